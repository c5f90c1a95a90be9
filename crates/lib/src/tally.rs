use crate::{Dominance, ImplementationTable, Realizability, TrialRecord};
use tracing::warn;

/// How the runs of one implementation resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealizabilityTally {
    pub adversarial: usize,
    pub cooperative_dominant: usize,
    pub cooperative_non_dominant: usize,
    pub unrealizable: usize,
    /// Cooperative runs without a dominance verdict. Not part of either dominance bucket.
    pub cooperative_unclassified: usize,
}

impl RealizabilityTally {
    pub fn of(records: &[TrialRecord]) -> Self {
        records.iter().fold(Self::default(), Self::add)
    }

    fn add(mut self, record: &TrialRecord) -> Self {
        match (record.realizability, record.dominance) {
            (Realizability::Adversarial, _) => self.adversarial += 1,
            (Realizability::Cooperative, Dominance::Dominant) => self.cooperative_dominant += 1,
            (Realizability::Cooperative, Dominance::NonDominant) => {
                self.cooperative_non_dominant += 1
            }
            (Realizability::Cooperative, Dominance::NotApplicable) => {
                self.cooperative_unclassified += 1
            }
            (Realizability::Unrealizable, _) => self.unrealizable += 1,
        }
        self
    }

    /// Runs counted in one of the four reported buckets.
    pub fn classified(&self) -> usize {
        self.adversarial
            + self.cooperative_dominant
            + self.cooperative_non_dominant
            + self.unrealizable
    }

    pub fn total(&self) -> usize {
        self.classified() + self.cooperative_unclassified
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RealizabilityTable {
    pub rows: Vec<(String, RealizabilityTally)>,
}

impl RealizabilityTable {
    pub fn build(tables: &[ImplementationTable]) -> Self {
        Self {
            rows: tables
                .iter()
                .map(|t| {
                    let tally = RealizabilityTally::of(&t.records);
                    if tally.cooperative_unclassified > 0 {
                        warn!(
                            implementation = %t.name,
                            runs = tally.cooperative_unclassified,
                            "cooperative runs without dominance verdict left out of dominance buckets"
                        );
                    }
                    (t.name.clone(), tally)
                })
                .collect(),
        }
    }
}
