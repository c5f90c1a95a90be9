use crate::{
    BreakdownRow, ComparisonTable, Phase, RealizabilityTable, RelativeCostSummary,
    TimeoutSolvedTable, TrialRecord,
};
use csv::WriterBuilder;
use std::io::Write;
use strum::IntoEnumIterator;

pub const INSTANCE_ID_HEADER: &str = "Instance ID";
pub const REQUESTS_HEADER: &str = "Number of Increment Requests";
pub const IMPLEMENTATION_HEADER: &str = "Implementation";
pub const TIMEOUT_HEADER: &str = "Timeout (s)";
pub const REALIZABILITY_HEADERS: [&str; 6] = [
    IMPLEMENTATION_HEADER,
    "Adversarial",
    "Cooperative Dominant",
    "Cooperative No Dominant",
    "Unrealizable",
    "Cooperative Unclassified",
];

const NOT_AVAILABLE: &str = "NA";

fn fixed(value: f64) -> String {
    format!("{value:.4}")
}

/// Writes records back in the headerless raw format.
pub fn write_trial_records<'a, W: Write>(
    records: impl IntoIterator<Item = &'a TrialRecord>,
    writer: W,
) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    for record in records {
        let mut row = vec![
            record.implementation.clone(),
            record.goal_file.clone(),
            record.env_file.clone(),
            record.starting_player.to_string(),
        ];
        row.extend(record.phases.0.iter().map(|phase| match phase {
            Some(seconds) => seconds.to_string(),
            None => NOT_AVAILABLE.to_string(),
        }));
        row.push(record.total_runtime.to_string());
        row.push(record.realizability.to_string());
        row.push(record.dominance.to_string());
        writer.write_record(&row)?;
    }
    writer.flush()
}

pub fn write_comparison<W: Write>(
    table: &ComparisonTable,
    writer: W,
) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(
        [INSTANCE_ID_HEADER, REQUESTS_HEADER]
            .into_iter()
            .chain(table.implementations.iter().map(String::as_str)),
    )?;

    let mut requests_buf = itoa::Buffer::new();
    for row in &table.rows {
        let mut record = vec![
            row.instance_id(),
            requests_buf.format(row.requests_count()).to_string(),
        ];
        record.extend(row.runtimes.iter().copied().map(fixed));
        writer.write_record(&record)?;
    }

    writer.flush()
}

/// Per-instance phase shares, in percent.
pub fn write_relative_cost<W: Write>(
    rows: &[BreakdownRow],
    writer: W,
) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    let phases = Phase::iter().map(|p| p.to_string()).collect::<Vec<_>>();
    writer.write_record(
        std::iter::once(INSTANCE_ID_HEADER).chain(phases.iter().map(String::as_str)),
    )?;

    for row in rows {
        let mut record = vec![row.instance.id()];
        record.extend(row.fractions.percent().into_iter().map(fixed));
        writer.write_record(&record)?;
    }

    writer.flush()
}

pub fn write_cost_summaries<W: Write>(
    summaries: &[RelativeCostSummary],
    writer: W,
) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    let phases = Phase::iter().map(|p| p.to_string()).collect::<Vec<_>>();
    writer.write_record(
        std::iter::once(IMPLEMENTATION_HEADER).chain(phases.iter().map(String::as_str)),
    )?;

    for summary in summaries {
        let mut record = vec![summary.implementation.clone()];
        record.extend(summary.percent.iter().map(|percent| match percent {
            Some(percent) => fixed(*percent),
            None => NOT_AVAILABLE.to_string(),
        }));
        writer.write_record(&record)?;
    }

    writer.flush()
}

pub fn write_timeout_solved<W: Write>(
    table: &TimeoutSolvedTable,
    writer: W,
) -> Result<(), std::io::Error> {
    // checked up front so a bad table writes nothing
    if table.counts.len() != table.implementations.len()
        || table
            .counts
            .iter()
            .any(|counts| counts.len() != table.thresholds.len())
    {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "timeout-solved table needs one count per threshold for every implementation",
        ));
    }

    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(
        std::iter::once(TIMEOUT_HEADER).chain(table.implementations.iter().map(String::as_str)),
    )?;

    let mut count_buf = itoa::Buffer::new();
    for (i, threshold) in table.thresholds.iter().enumerate() {
        let mut record = vec![count_buf.format(*threshold).to_string()];
        record.extend(
            table
                .counts
                .iter()
                .map(|counts| count_buf.format(counts[i]).to_string()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()
}

pub fn write_realizability<W: Write>(
    table: &RealizabilityTable,
    writer: W,
) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(REALIZABILITY_HEADERS)?;

    let mut count_buf = itoa::Buffer::new();
    for (implementation, tally) in &table.rows {
        let mut record = vec![implementation.clone()];
        record.extend(
            [
                tally.adversarial,
                tally.cooperative_dominant,
                tally.cooperative_non_dominant,
                tally.unrealizable,
                tally.cooperative_unclassified,
            ]
            .into_iter()
            .map(|count| count_buf.format(count).to_string()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()
}
