use strum_macros::{Display, EnumCount, EnumIter, EnumString, FromRepr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum StartingPlayer {
    Agent,
    Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum Realizability {
    #[strum(to_string = "Adv")]
    Adversarial,
    #[strum(to_string = "Coop")]
    Cooperative,
    // reactive synthesizers report `NoAdv` instead of `Unr`
    #[strum(to_string = "Unr", serialize = "NoAdv")]
    Unrealizable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum Dominance {
    #[strum(to_string = "Dom")]
    Dominant,
    #[strum(to_string = "NoDom")]
    NonDominant,
    #[strum(to_string = "NA")]
    NotApplicable,
}

/// The independently timed phases of a synthesis run, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount, FromRepr)]
pub enum Phase {
    #[strum(to_string = "LTLf2DFA")]
    LtlfToDfa,
    #[strum(to_string = "DFA2Sym")]
    DfaToSymbolic,
    #[strum(to_string = "AdvGame")]
    AdversarialGame,
    #[strum(to_string = "CoopGame")]
    CooperativeGame,
    #[strum(to_string = "DomCheck")]
    DominanceTest,
}

pub const PHASE_COUNT: usize = <Phase as strum::EnumCount>::COUNT;

/// Phase durations in seconds. `None` is a phase the tool did not run (`NA` in the table).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseTimes(pub [Option<f64>; PHASE_COUNT]);

impl PhaseTimes {
    pub fn new(times: [f64; PHASE_COUNT]) -> Self {
        Self(times.map(Some))
    }

    pub fn get(&self, phase: Phase) -> Option<f64> {
        self.0[phase as usize]
    }

    /// Duration of `phase`, absent phases counting as zero.
    pub fn duration(&self, phase: Phase) -> f64 {
        self.get(phase).unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().flatten().sum()
    }
}

/// One run of one tool variant on one (goal, env) instance.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRecord {
    pub implementation: String,
    pub goal_file: String,
    pub env_file: String,
    pub starting_player: StartingPlayer,
    pub phases: PhaseTimes,
    pub total_runtime: f64,
    pub realizability: Realizability,
    pub dominance: Dominance,
}

impl TrialRecord {
    pub fn is_instance(&self, goal_file: &str, env_file: &str) -> bool {
        self.goal_file == goal_file && self.env_file == env_file
    }
}
