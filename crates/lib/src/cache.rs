use crate::{
    error::Error,
    writer::{write_realizability, write_timeout_solved, REALIZABILITY_HEADERS, TIMEOUT_HEADER},
    RealizabilityTable, RealizabilityTally, TimeoutSolvedTable,
};
use csv::{ReaderBuilder, StringRecord};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
    str::FromStr,
};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cached table has an unexpected header: `{0}`")]
    UnexpectedHeader(String),
    #[error("Invalid value on line {line}: `{value}`")]
    InvalidField { line: u64, value: String },
    #[error(transparent)]
    CSVError(#[from] csv::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// A derived table that can be memoized to a CSV file with header.
pub trait CachedTable: Sized {
    fn read_from<R: Read>(reader: R) -> Result<Self, CacheError>;
    fn write_to<W: Write>(&self, writer: W) -> Result<(), std::io::Error>;
}

/// Reads the table from `path` if the file exists, otherwise builds it and writes it there.
/// The cache is never checked against the raw tables it was built from.
pub fn load_or_build<T, P, F>(path: P, build: F) -> Result<T, Error>
where
    T: CachedTable,
    P: AsRef<Path>,
    F: FnOnce() -> Result<T, Error>,
{
    let path = path.as_ref();
    if path.is_file() {
        info!(?path, "using cached table");
        return Ok(T::read_from(BufReader::new(File::open(path)?))?);
    }

    let table = build()?;
    // written next to the cache and renamed into place, so a failed write leaves no cache
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    table.write_to(BufWriter::new(&mut file))?;
    file.persist(path).map_err(|e| e.error)?;
    info!(?path, "wrote cached table");
    Ok(table)
}

fn parse_field<T: FromStr>(record: &StringRecord, index: usize) -> Result<T, CacheError> {
    let value = record.get(index).unwrap_or_default();
    value.trim().parse().map_err(|_| CacheError::InvalidField {
        line: record.position().map(|p| p.line()).unwrap_or_default(),
        value: value.to_string(),
    })
}

fn header_line(headers: &StringRecord) -> String {
    headers.iter().collect::<Vec<_>>().join(",")
}

impl CachedTable for TimeoutSolvedTable {
    fn read_from<R: Read>(reader: R) -> Result<Self, CacheError> {
        let mut reader = ReaderBuilder::new().from_reader(reader);
        let headers = reader.headers()?.clone();
        if headers.get(0) != Some(TIMEOUT_HEADER) {
            return Err(CacheError::UnexpectedHeader(header_line(&headers)));
        }

        let mut table = TimeoutSolvedTable {
            implementations: headers.iter().skip(1).map(str::to_string).collect(),
            thresholds: Vec::new(),
            counts: vec![Vec::new(); headers.len() - 1],
        };
        for record in reader.records() {
            let record = record?;
            table.thresholds.push(parse_field(&record, 0)?);
            for (i, counts) in table.counts.iter_mut().enumerate() {
                counts.push(parse_field(&record, i + 1)?);
            }
        }
        Ok(table)
    }

    fn write_to<W: Write>(&self, writer: W) -> Result<(), std::io::Error> {
        write_timeout_solved(self, writer)
    }
}

impl CachedTable for RealizabilityTable {
    fn read_from<R: Read>(reader: R) -> Result<Self, CacheError> {
        let mut reader = ReaderBuilder::new().from_reader(reader);
        let headers = reader.headers()?;
        if !headers.iter().eq(REALIZABILITY_HEADERS) {
            return Err(CacheError::UnexpectedHeader(header_line(headers)));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let tally = RealizabilityTally {
                adversarial: parse_field(&record, 1)?,
                cooperative_dominant: parse_field(&record, 2)?,
                cooperative_non_dominant: parse_field(&record, 3)?,
                unrealizable: parse_field(&record, 4)?,
                cooperative_unclassified: parse_field(&record, 5)?,
            };
            rows.push((record.get(0).unwrap_or_default().to_string(), tally));
        }
        Ok(RealizabilityTable { rows })
    }

    fn write_to<W: Write>(&self, writer: W) -> Result<(), std::io::Error> {
        write_realizability(self, writer)
    }
}
