use std::ops::RangeInclusive;

/// Runtime recorded for an instance that has no row in a table.
pub const TIMEOUT: f64 = 1000.0;

/// How a (goal, env) pair is matched against the rows of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Both the goal and the env file must be equal.
    #[default]
    Exact,
    /// Only the env file is compared. Reproduces the figures published from the
    /// old plotting scripts, where the goal comparison was always true.
    LegacyEnvOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub counter_size: u32,
    pub requests: RangeInclusive<u32>,
    pub timeout: f64,
    /// Step of the timeout grid in seconds.
    pub timeout_step: u32,
    /// Largest threshold of the timeout grid in seconds.
    pub timeout_max: u32,
    /// Display names by 1-based implementation index.
    pub display_names: Vec<&'static str>,
    /// Named sets of implementation indices drawn together on one timeout chart.
    pub chart_groups: Vec<(&'static str, Vec<usize>)>,
    pub match_mode: MatchMode,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            counter_size: 8,
            requests: 1..=10,
            timeout: TIMEOUT,
            timeout_step: 5,
            timeout_max: 1000,
            display_names: vec![
                "direct BeSyft",
                "compositional-minimal BeSyft",
                "compositional BeSyft",
                "compositional-minimal Syft",
                "compositional Syft",
            ],
            chart_groups: vec![("all", (1..=5).collect())],
            match_mode: MatchMode::Exact,
        }
    }
}

impl BenchConfig {
    /// Naming of the random benchmark runs, where every best-effort variant was also run
    /// with the dominance test disabled.
    pub fn random_benchmarks() -> Self {
        Self {
            display_names: vec![
                "direct BeSyft",
                "direct BeSyft (no dominance)",
                "compositional-minimal BeSyft",
                "compositional-minimal BeSyft (no dominance)",
                "compositional BeSyft",
                "compositional BeSyft (no dominance)",
                "compositional-minimal Syft",
                "compositional Syft",
            ],
            chart_groups: vec![
                ("dominance", vec![1, 3, 5, 7, 8]),
                ("best_effort", (1..=6).collect()),
            ],
            ..Default::default()
        }
    }

    /// Display names of the implementations in `indices`, unknown indices skipped.
    pub fn names_of(&self, indices: &[usize]) -> Vec<&'static str> {
        indices
            .iter()
            .filter_map(|i| self.display_name(*i))
            .collect()
    }

    pub fn display_name(&self, index: usize) -> Option<&'static str> {
        index
            .checked_sub(1)
            .and_then(|i| self.display_names.get(i))
            .copied()
    }
}
