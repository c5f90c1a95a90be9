mod cache;
mod comparison;
mod config;
mod error;
mod instance;
mod matcher;
mod parser;
mod record;
mod relative_cost;
mod tally;
mod timeout;
mod writer;

pub use cache::{load_or_build, CacheError, CachedTable};
pub use comparison::*;
pub use config::*;
pub use error::Error;
pub use instance::*;
pub use matcher::*;
pub use parser::{load_table, parse_csv, parse_from_reader, Column, LoadError, COLUMN_COUNT};
pub use record::*;
pub use relative_cost::*;
pub use tally::*;
pub use timeout::*;
pub use writer::*;

/// Loads one raw table and writes its comparison table.
pub fn execute<R: std::io::Read, W: std::io::Write>(
    config: &BenchConfig,
    implementation: &str,
    reader: R,
    writer: W,
) -> Result<(), error::Error> {
    let records = parse_csv(reader)?;
    let table = build_comparison(config, &[ImplementationTable::new(implementation, records)]);
    Ok(write_comparison(&table, writer)?)
}
