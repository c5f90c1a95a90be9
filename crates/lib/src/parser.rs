use crate::record::*;
use csv::{ReaderBuilder, StringRecord};
use std::{fs::File, io::BufReader, path::Path, str::FromStr};
use thiserror::Error;
use tracing::debug;

/// Columns of a raw trial table, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Implementation,
    Goal,
    Env,
    StartingPlayer,
    LtlfToDfa,
    DfaToSymbolic,
    AdversarialGame,
    CooperativeGame,
    DominanceTest,
    TotalRuntime,
    Realizability,
    Dominance,
}

pub const COLUMN_COUNT: usize = 12;

const PHASE_COLUMNS: [Column; PHASE_COUNT] = [
    Column::LtlfToDfa,
    Column::DfaToSymbolic,
    Column::AdversarialGame,
    Column::CooperativeGame,
    Column::DominanceTest,
];

const NOT_AVAILABLE: &str = "NA";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Row on line {line} has {found} fields, expected {}", COLUMN_COUNT)]
    MalformedRow { line: u64, found: usize },
    #[error("Invalid value in column `{column:?}` on line {line}: `{value}`")]
    InvalidField {
        line: u64,
        column: Column,
        value: String,
    },
    #[error(transparent)]
    CSVError(#[from] csv::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Loads a headerless raw trial table. Any bad row aborts the whole load.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Vec<TrialRecord>, LoadError> {
    let file = File::open(path.as_ref())?;
    let records = parse_csv(BufReader::new(file))?;
    debug!(path = ?path.as_ref(), rows = records.len(), "loaded raw table");
    Ok(records)
}

pub fn parse_csv<R: std::io::Read>(reader: R) -> Result<Vec<TrialRecord>, LoadError> {
    parse_from_reader(
        ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader),
    )
}

pub fn parse_from_reader<R: std::io::Read>(
    reader: csv::Reader<R>,
) -> Result<Vec<TrialRecord>, LoadError> {
    reader
        .into_records()
        .map(|res| {
            let record = res?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            parse_trial(&record, line)
        })
        .collect()
}

fn field(record: &StringRecord, column: Column) -> &str {
    // arity is checked before any field is read
    record.get(column as usize).unwrap_or_default()
}

fn parse_enum<T: FromStr>(record: &StringRecord, column: Column, line: u64) -> Result<T, LoadError> {
    let value = field(record, column);
    value.parse().map_err(|_| LoadError::InvalidField {
        line,
        column,
        value: value.to_string(),
    })
}

fn parse_seconds(record: &StringRecord, column: Column, line: u64) -> Result<f64, LoadError> {
    let value = field(record, column);
    match value.trim().parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(seconds),
        _ => Err(LoadError::InvalidField {
            line,
            column,
            value: value.to_string(),
        }),
    }
}

#[inline]
fn parse_trial(record: &StringRecord, line: u64) -> Result<TrialRecord, LoadError> {
    if record.len() < COLUMN_COUNT {
        return Err(LoadError::MalformedRow {
            line,
            found: record.len(),
        });
    }

    let mut phases = PhaseTimes::default();
    for (slot, column) in phases.0.iter_mut().zip(PHASE_COLUMNS) {
        *slot = if field(record, column).trim() == NOT_AVAILABLE {
            None
        } else {
            Some(parse_seconds(record, column, line)?)
        };
    }

    Ok(TrialRecord {
        implementation: field(record, Column::Implementation).to_string(),
        goal_file: field(record, Column::Goal).to_string(),
        env_file: field(record, Column::Env).to_string(),
        starting_player: parse_enum(record, Column::StartingPlayer, line)?,
        phases,
        total_runtime: parse_seconds(record, Column::TotalRuntime, line)?,
        realizability: parse_enum(record, Column::Realizability, line)?,
        dominance: parse_enum(record, Column::Dominance, line)?,
    })
}
