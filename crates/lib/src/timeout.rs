use crate::{BenchConfig, ImplementationTable, TrialRecord};
use tracing::debug;

/// Thresholds `step, 2 * step, ..` up to and including `max`, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutGrid {
    pub step: u32,
    pub max: u32,
}

impl TimeoutGrid {
    pub fn new(step: u32, max: u32) -> Self {
        Self { step, max }
    }

    pub fn from_config(config: &BenchConfig) -> Self {
        Self::new(config.timeout_step, config.timeout_max)
    }

    pub fn thresholds(&self) -> impl Iterator<Item = u32> {
        let step = self.step.max(1);
        (step..=self.max).step_by(step as usize)
    }
}

/// Number of runs with a total runtime strictly below each threshold of the grid.
pub fn solved_counts(grid: TimeoutGrid, records: &[TrialRecord]) -> Vec<usize> {
    let mut runtimes = records.iter().map(|r| r.total_runtime).collect::<Vec<_>>();
    runtimes.sort_unstable_by(f64::total_cmp);
    grid.thresholds()
        .map(|threshold| runtimes.partition_point(|runtime| *runtime < f64::from(threshold)))
        .collect()
}

/// Same as [`solved_counts`] but rescans the runs for every threshold.
pub fn solved_counts_rescan(grid: TimeoutGrid, records: &[TrialRecord]) -> Vec<usize> {
    grid.thresholds()
        .map(|threshold| {
            records
                .iter()
                .filter(|r| r.total_runtime < f64::from(threshold))
                .count()
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeoutSolvedTable {
    pub implementations: Vec<String>,
    pub thresholds: Vec<u32>,
    /// `counts[implementation][threshold]`
    pub counts: Vec<Vec<usize>>,
}

impl TimeoutSolvedTable {
    pub fn build(grid: TimeoutGrid, tables: &[ImplementationTable]) -> Self {
        let table = Self {
            implementations: tables.iter().map(|t| t.name.clone()).collect(),
            thresholds: grid.thresholds().collect(),
            counts: tables
                .iter()
                .map(|t| solved_counts(grid, &t.records))
                .collect(),
        };
        debug!(
            thresholds = table.thresholds.len(),
            implementations = table.implementations.len(),
            "built timeout-solved table"
        );
        table
    }

    /// Columns of the named implementations, in the order given. Unknown names are skipped.
    pub fn subset(&self, implementations: &[&str]) -> Self {
        let (implementations, counts) = implementations
            .iter()
            .filter_map(|name| {
                let i = self.implementations.iter().position(|n| n == name)?;
                Some((self.implementations[i].clone(), self.counts.get(i)?.clone()))
            })
            .unzip();
        Self {
            implementations,
            thresholds: self.thresholds.clone(),
            counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dominance, PhaseTimes, Realizability, StartingPlayer, TIMEOUT};
    use rand::prelude::*;

    fn runs(runtimes: &[f64]) -> Vec<TrialRecord> {
        runtimes
            .iter()
            .map(|runtime| TrialRecord {
                implementation: "Compositional Syft".to_string(),
                goal_file: "goal_8.ltlf".to_string(),
                env_file: "env_1.ltlf".to_string(),
                starting_player: StartingPlayer::Environment,
                phases: PhaseTimes::new([*runtime, 0.0, 0.0, 0.0, 0.0]),
                total_runtime: *runtime,
                realizability: Realizability::Adversarial,
                dominance: Dominance::Dominant,
            })
            .collect()
    }

    #[test]
    fn grid_is_inclusive() {
        let grid = TimeoutGrid::new(5, 20);
        assert_eq!(grid.thresholds().collect::<Vec<_>>(), [5, 10, 15, 20]);
        assert_eq!(
            TimeoutGrid::from_config(&BenchConfig::default())
                .thresholds()
                .count(),
            200
        );
    }

    #[test]
    fn threshold_is_strict() {
        let grid = TimeoutGrid::new(10, 30);
        assert_eq!(solved_counts(grid, &runs(&[10.0, 25.0, 9.99])), [1, 2, 3]);
    }

    #[test]
    fn timeout_sentinel_is_never_solved() {
        let grid = TimeoutGrid::new(5, 1000);
        let counts = solved_counts(grid, &runs(&[10.0, TIMEOUT, 25.0]));
        assert_eq!(counts[3], 1); // threshold 20
        assert_eq!(counts.last(), Some(&2)); // threshold 1000
    }

    #[test]
    fn sweep_matches_rescan() {
        let mut rng = StdRng::seed_from_u64(7);
        let runtimes = (0..500)
            .map(|_| rng.gen_range(0.0..1200.0))
            .collect::<Vec<f64>>();
        let records = runs(&runtimes);
        let grid = TimeoutGrid::new(5, 1000);
        assert_eq!(
            solved_counts(grid, &records),
            solved_counts_rescan(grid, &records)
        );
    }

    #[test]
    fn subset_keeps_requested_columns_in_order() {
        let table = TimeoutSolvedTable::build(
            TimeoutGrid::new(10, 20),
            &[
                ImplementationTable::new("direct BeSyft", runs(&[5.0])),
                ImplementationTable::new("compositional BeSyft", runs(&[15.0])),
                ImplementationTable::new("compositional Syft", runs(&[25.0])),
            ],
        );
        let subset = table.subset(&["compositional Syft", "missing", "direct BeSyft"]);
        assert_eq!(subset.implementations, ["compositional Syft", "direct BeSyft"]);
        assert_eq!(subset.thresholds, [10, 20]);
        assert_eq!(subset.counts, [vec![0, 0], vec![1, 1]]);
    }

    #[test]
    fn counts_are_monotone_and_reach_total() {
        let mut rng = StdRng::seed_from_u64(42);
        let runtimes = (0..200)
            .map(|_| rng.gen_range(0.0..900.0))
            .collect::<Vec<f64>>();
        let table = TimeoutSolvedTable::build(
            TimeoutGrid::new(5, 1000),
            &[ImplementationTable::new("compositional Syft", runs(&runtimes))],
        );
        let counts = &table.counts[0];
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(counts.last(), Some(&200));
    }
}
