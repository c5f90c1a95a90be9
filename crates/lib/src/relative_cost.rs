use crate::{
    find_instance, BenchConfig, GoalFamily, Instance, Phase, Realizability, TrialRecord,
    PHASE_COUNT,
};
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{debug, warn};

const PERCENT: f64 = 100.0;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Runtime of `{goal_file}` x `{env_file}` is zero")]
    DivisionUndefined { goal_file: String, env_file: String },
}

/// Share of a run's time spent in each phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseFractions(pub [f64; PHASE_COUNT]);

impl PhaseFractions {
    pub fn get(&self, phase: Phase) -> f64 {
        self.0[phase as usize]
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn percent(&self) -> [f64; PHASE_COUNT] {
        self.0.map(|fraction| fraction * PERCENT)
    }
}

fn fractions_of(
    record: &TrialRecord,
    denominator: f64,
) -> Result<PhaseFractions, AggregateError> {
    if denominator == 0.0 {
        return Err(AggregateError::DivisionUndefined {
            goal_file: record.goal_file.clone(),
            env_file: record.env_file.clone(),
        });
    }
    let mut fractions = [0.0; PHASE_COUNT];
    for phase in Phase::iter() {
        fractions[phase as usize] = record.phases.duration(phase) / denominator;
    }
    Ok(PhaseFractions(fractions))
}

/// Splits a run into phase shares of the timed phases, so a row always adds up to one.
/// Overhead outside the phases and `NA` phases take no share.
pub fn normalize(record: &TrialRecord) -> Result<PhaseFractions, AggregateError> {
    fractions_of(record, record.phases.sum())
}

/// Phase shares of the total runtime, overhead included.
pub fn runtime_fractions(record: &TrialRecord) -> Result<PhaseFractions, AggregateError> {
    fractions_of(record, record.total_runtime)
}

/// One result per input record, in order.
pub fn normalize_all(
    records: &[TrialRecord],
) -> impl Iterator<Item = Result<PhaseFractions, AggregateError>> + '_ {
    records.iter().map(normalize)
}

/// Row of the stacked relative-time chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub instance: Instance,
    pub fractions: PhaseFractions,
}

/// Relative costs of the non-dominance instances at `counter_size`, in request order.
/// Missing instances and rows without any phase time are left out.
pub fn instance_breakdown(
    config: &BenchConfig,
    counter_size: u32,
    records: &[TrialRecord],
) -> Vec<BreakdownRow> {
    let goal_file = GoalFamily::NonDominance.goal_file(counter_size);
    config
        .requests
        .clone()
        .map(|requests| Instance::new(GoalFamily::NonDominance, requests))
        .filter_map(|instance| {
            let record = find_instance(
                &goal_file,
                &instance.env_file(),
                records,
                config.match_mode,
            )?;
            match normalize(record) {
                Ok(fractions) => Some(BreakdownRow {
                    instance,
                    fractions,
                }),
                Err(e) => {
                    warn!(instance = %instance, "skipping row: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Mean share of the total runtime spent in each phase over the runs of one
/// implementation, in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeCostSummary {
    pub implementation: String,
    /// Runs with a nonzero total runtime.
    pub records: usize,
    /// Cooperatively realizable runs among `records`.
    pub cooperative: usize,
    /// `None` when the phase's denominator is empty. The dominance test is averaged
    /// over the cooperative runs only.
    pub percent: [Option<f64>; PHASE_COUNT],
}

impl RelativeCostSummary {
    pub fn get(&self, phase: Phase) -> Option<f64> {
        self.percent[phase as usize]
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct CostReduction {
    sums: [f64; PHASE_COUNT],
    records: usize,
    dominance_sum: f64,
    cooperative: usize,
}

impl CostReduction {
    fn add(mut self, record: &TrialRecord, fractions: PhaseFractions) -> Self {
        for phase in Phase::iter().filter(|p| *p != Phase::DominanceTest) {
            self.sums[phase as usize] += fractions.get(phase);
        }
        self.records += 1;
        if record.realizability == Realizability::Cooperative {
            self.dominance_sum += fractions.get(Phase::DominanceTest);
            self.cooperative += 1;
        }
        self
    }

    fn finish(self, implementation: &str) -> RelativeCostSummary {
        let mean = |sum: f64, count: usize| (count > 0).then(|| sum / count as f64 * PERCENT);
        let mut percent = self.sums.map(|sum| mean(sum, self.records));
        percent[Phase::DominanceTest as usize] = mean(self.dominance_sum, self.cooperative);
        RelativeCostSummary {
            implementation: implementation.to_string(),
            records: self.records,
            cooperative: self.cooperative,
            percent,
        }
    }
}

pub fn summarize(implementation: &str, records: &[TrialRecord]) -> RelativeCostSummary {
    let summary = records
        .iter()
        .filter_map(|record| match runtime_fractions(record) {
            Ok(fractions) => Some((record, fractions)),
            Err(e) => {
                warn!(implementation, "skipping row: {e}");
                None
            }
        })
        .fold(CostReduction::default(), |acc, (record, fractions)| {
            acc.add(record, fractions)
        })
        .finish(implementation);
    debug!(implementation, records = summary.records, "summarized relative costs");
    summary
}

/// Largest counter size with at least one non-dominance run in the table.
pub fn hardest_solved_counter(records: &[TrialRecord]) -> Option<u32> {
    records
        .iter()
        .filter_map(|r| Instance::from_files(&r.goal_file, &r.env_file))
        .filter(|(instance, _)| instance.family == GoalFamily::NonDominance)
        .map(|(_, counter)| counter)
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_csv, Dominance, PhaseTimes, StartingPlayer};

    fn trial(env: &str, phases: [f64; PHASE_COUNT], realizability: Realizability) -> TrialRecord {
        let phases = PhaseTimes::new(phases);
        TrialRecord {
            implementation: "Direct Best-Effort Synthesizer".to_string(),
            goal_file: "goal_8.ltlf".to_string(),
            env_file: env.to_string(),
            starting_player: StartingPlayer::Agent,
            total_runtime: phases.sum(),
            phases,
            realizability,
            dominance: Dominance::NotApplicable,
        }
    }

    #[test]
    fn fractions_sum_to_one() {
        let records = [
            trial("env_1.ltlf", [0.1, 0.2, 0.3, 0.4, 0.0], Realizability::Adversarial),
            trial("env_2.ltlf", [3.7, 0.01, 12.5, 0.003, 1.9], Realizability::Cooperative),
            trial("env_3.ltlf", [1e-6, 2e-6, 0.0, 0.0, 0.0], Realizability::Unrealizable),
        ];
        for fractions in normalize_all(&records) {
            assert!((fractions.unwrap().sum() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn rows_with_overhead_and_missing_phases_sum_to_one() {
        let input = "\
A,goal_8.ltlf,env_1.ltlf,Agent,0.1,0.2,0.3,0.4,NA,1.5,Coop,NA
A,goal_8.ltlf,env_2.ltlf,Agent,1,1,1,1,1,5.2,Coop,Dom
C,goal_8.ltlf,env_3.ltlf,Environment,0.25,0.5,1,NA,NA,1.75,Unr,NA
";
        let records = parse_csv(input.as_bytes()).unwrap();
        for fractions in normalize_all(&records) {
            assert!((fractions.unwrap().sum() - 1.0).abs() < 1e-9);
        }
        let first = normalize(&records[0]).unwrap();
        assert!((first.get(Phase::AdversarialGame) - 0.3).abs() < 1e-9);
        assert_eq!(first.get(Phase::DominanceTest), 0.0);

        // the runtime share keeps the overhead out of the phases
        assert!((runtime_fractions(&records[1]).unwrap().sum() - 5.0 / 5.2).abs() < 1e-9);

        for row in instance_breakdown(&BenchConfig::default(), 8, &records) {
            assert!((row.fractions.percent().iter().sum::<f64>() - 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn run_without_phase_times_cannot_be_split() {
        let input = "A,goal_8.ltlf,env_1.ltlf,Agent,NA,NA,NA,NA,NA,0.5,Unr,NA\n";
        let records = parse_csv(input.as_bytes()).unwrap();
        assert!(matches!(
            normalize(&records[0]),
            Err(AggregateError::DivisionUndefined { .. })
        ));
        assert_eq!(runtime_fractions(&records[0]).unwrap().sum(), 0.0);
    }

    #[test]
    fn summary_divides_by_total_runtime() {
        let input = "A,goal_8.ltlf,env_1.ltlf,Agent,1,1,NA,NA,NA,4,Adv,Dom\n";
        let summary = summarize("direct", &parse_csv(input.as_bytes()).unwrap());
        assert_eq!(summary.get(Phase::LtlfToDfa), Some(25.0));
        assert_eq!(summary.get(Phase::DfaToSymbolic), Some(25.0));
    }

    #[test]
    fn zero_runtime_is_division_undefined() {
        let record = trial("env_1.ltlf", [0.0; PHASE_COUNT], Realizability::Adversarial);
        assert_eq!(
            normalize(&record),
            Err(AggregateError::DivisionUndefined {
                goal_file: "goal_8.ltlf".to_string(),
                env_file: "env_1.ltlf".to_string()
            })
        );
    }

    #[test]
    fn dominance_test_is_averaged_over_cooperative_runs() {
        let records = [
            trial("env_1.ltlf", [1.0, 1.0, 1.0, 1.0, 0.0], Realizability::Adversarial),
            trial("env_2.ltlf", [1.0, 0.0, 0.0, 0.0, 1.0], Realizability::Cooperative),
            trial("env_3.ltlf", [0.0; PHASE_COUNT], Realizability::Cooperative),
        ];
        let summary = summarize("direct", &records);
        assert_eq!(summary.records, 2);
        assert_eq!(summary.cooperative, 1);
        assert_eq!(summary.get(Phase::LtlfToDfa), Some(37.5));
        assert_eq!(summary.get(Phase::DfaToSymbolic), Some(12.5));
        assert_eq!(summary.get(Phase::DominanceTest), Some(50.0));
    }

    #[test]
    fn summary_without_cooperative_runs_has_no_dominance_share() {
        let records = [trial("env_1.ltlf", [1.0, 1.0, 0.0, 0.0, 0.0], Realizability::Unrealizable)];
        let summary = summarize("direct", &records);
        assert_eq!(summary.get(Phase::AdversarialGame), Some(0.0));
        assert_eq!(summary.get(Phase::DominanceTest), None);
        assert_eq!(summarize("empty", &[]).get(Phase::LtlfToDfa), None);
    }

    #[test]
    fn breakdown_follows_request_order_and_skips_gaps() {
        let input = "\
A,goal_8.ltlf,env_3.ltlf,Agent,1,1,1,1,0,4,Adv,Dom
A,goal_8.ltlf,env_1.ltlf,Agent,2,0,0,0,0,2,Adv,Dom
A,goal_8.ltlf,env_2.ltlf,Agent,0,0,0,0,0,0,Adv,Dom
A,goal_dominance_8.ltlf,env_4.ltlf,Agent,1,0,0,0,0,1,Adv,Dom
";
        let records = parse_csv(input.as_bytes()).unwrap();
        let rows = instance_breakdown(&BenchConfig::default(), 8, &records);
        assert_eq!(
            rows.iter().map(|r| r.instance.id()).collect::<Vec<_>>(),
            ["ND-1", "ND-3"]
        );
        assert_eq!(rows[0].fractions.percent(), [100.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(rows[1].fractions.get(Phase::CooperativeGame), 0.25);
    }

    #[test]
    fn breakdown_can_target_hardest_solved_counter() {
        let input = "\
A,goal_3.ltlf,env_1.ltlf,Agent,1,1,0,0,0,2,Adv,Dom
A,goal_3.ltlf,env_2.ltlf,Agent,1,3,0,0,0,4,Adv,Dom
A,goal_2.ltlf,env_1.ltlf,Agent,1,0,0,0,0,1,Adv,Dom
";
        let records = parse_csv(input.as_bytes()).unwrap();
        let config = BenchConfig::default();
        assert!(instance_breakdown(&config, config.counter_size, &records).is_empty());

        let hardest = hardest_solved_counter(&records).unwrap();
        assert_eq!(hardest, 3);
        let rows = instance_breakdown(&config, hardest, &records);
        assert_eq!(
            rows.iter().map(|r| r.instance.id()).collect::<Vec<_>>(),
            ["ND-1", "ND-2"]
        );
        assert_eq!(rows[1].fractions.get(Phase::DfaToSymbolic), 0.75);
    }

    #[test]
    fn hardest_counter_ignores_dominance_goals() {
        let input = "\
A,goal_3.ltlf,env_1.ltlf,Agent,1,1,1,1,0,4,Adv,Dom
A,goal_5.ltlf,env_1.ltlf,Agent,1,1,1,1,0,4,Adv,Dom
A,goal_dominance_9.ltlf,env_1.ltlf,Agent,1,1,1,1,0,4,Adv,Dom
";
        let records = parse_csv(input.as_bytes()).unwrap();
        assert_eq!(hardest_solved_counter(&records), Some(5));
        assert_eq!(hardest_solved_counter(&[]), None);
    }
}
