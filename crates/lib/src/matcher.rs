use crate::{MatchMode, TrialRecord};
use tracing::debug;

/// Finds the row for a (goal, env) pair. Duplicate rows resolve to the last one.
pub fn find_instance<'a>(
    goal_file: &str,
    env_file: &str,
    records: &'a [TrialRecord],
    mode: MatchMode,
) -> Option<&'a TrialRecord> {
    records.iter().rev().find(|record| match mode {
        MatchMode::Exact => record.is_instance(goal_file, env_file),
        MatchMode::LegacyEnvOnly => record.env_file == env_file,
    })
}

/// Runtime of the (goal, env) instance, or `timeout` when the table has no row for it.
pub fn match_runtime(
    goal_file: &str,
    env_file: &str,
    records: &[TrialRecord],
    mode: MatchMode,
    timeout: f64,
) -> f64 {
    match find_instance(goal_file, env_file, records, mode) {
        Some(record) => record.total_runtime,
        None => {
            debug!(goal_file, env_file, "missing instance, using timeout");
            timeout
        }
    }
}
