mod render;

use besyft_bench_lib::{
    build_comparison, build_family_scaling, hardest_solved_counter, instance_breakdown,
    load_or_build, load_table, summarize, write_comparison, write_cost_summaries,
    write_realizability, write_relative_cost, write_timeout_solved, BenchConfig, GoalFamily,
    Error, ImplementationTable, MatchMode, RealizabilityTable, TimeoutGrid, TimeoutSolvedTable,
};
use eyre::Result;
use std::{env, io, path::Path};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: besyft-bench <comparison|scaling|relative-cost|timeout-solved|realizability> [--legacy-match] [N=]<raw.csv>...";
const TIMEOUT_CACHE: &str = "timeout_vs_solved_instances.csv";
const REALIZABILITY_CACHE: &str = "implementation_realizability.csv";

/// A raw table argument. `N=path` names the table after implementation `N`,
/// a bare path takes its 1-based argument position.
struct TableArg {
    index: usize,
    path: String,
}

impl TableArg {
    fn parse(position: usize, arg: String) -> Self {
        match arg.split_once('=').map(|(n, path)| (n.parse::<usize>(), path)) {
            Some((Ok(index), path)) => Self {
                index,
                path: path.to_string(),
            },
            _ => Self {
                index: position,
                path: arg,
            },
        }
    }
}

fn load_tables(config: &BenchConfig, args: &[TableArg]) -> Result<Vec<ImplementationTable>, Error> {
    args.iter()
        .map(|arg| {
            let name = match config.display_name(arg.index) {
                Some(name) => name.to_string(),
                None => Path::new(&arg.path)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| arg.path.clone()),
            };
            Ok(ImplementationTable::new(name, load_table(&arg.path)?))
        })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let command = args.next().ok_or(eyre::eyre!("Missing command\n{USAGE}"))?;

    // the timeout and realizability charts come from the random benchmark runs
    let mut config = match command.as_str() {
        "timeout-solved" | "realizability" => BenchConfig::random_benchmarks(),
        _ => BenchConfig::default(),
    };
    let mut paths = Vec::new();
    for arg in args {
        if arg == "--legacy-match" {
            config.match_mode = MatchMode::LegacyEnvOnly;
        } else {
            paths.push(TableArg::parse(paths.len() + 1, arg));
        }
    }

    let stdout = io::stdout();
    match command.as_str() {
        "comparison" => {
            let table = build_comparison(&config, &load_tables(&config, &paths)?);
            write_comparison(&table, stdout.lock())?;
            render::comparison_bars("comparison.png", &table)?;
        }
        "scaling" => {
            let tables = load_tables(&config, &paths)?;
            for counter_size in 1..=config.counter_size {
                let table =
                    build_family_scaling(&config, GoalFamily::NonDominance, counter_size, &tables);
                write_comparison(&table, stdout.lock())?;
                render::scaling_lines(format!("scaling_{counter_size}.png"), counter_size, &table)?;
            }
        }
        "relative-cost" => {
            let tables = load_tables(&config, &paths)?;
            let summaries = tables
                .iter()
                .map(|t| summarize(&t.name, &t.records))
                .collect::<Vec<_>>();
            write_cost_summaries(&summaries, stdout.lock())?;

            for (i, table) in tables.iter().enumerate() {
                let rows = instance_breakdown(&config, config.counter_size, &table.records);
                write_relative_cost(&rows, stdout.lock())?;
                render::breakdown_bars(
                    format!("relative_cost_{}.png", i + 1),
                    &table.name,
                    &rows,
                )?;

                let hardest = hardest_solved_counter(&table.records);
                if let Some(hardest) = hardest.filter(|&n| n != config.counter_size) {
                    info!(implementation = %table.name, hardest, "hardest solved counter");
                    let rows = instance_breakdown(&config, hardest, &table.records);
                    write_relative_cost(&rows, stdout.lock())?;
                    render::breakdown_bars(
                        format!("relative_cost_{}_{hardest}.png", i + 1),
                        &table.name,
                        &rows,
                    )?;
                }
            }
        }
        "timeout-solved" => {
            let grid = TimeoutGrid::from_config(&config);
            let table = load_or_build(TIMEOUT_CACHE, || {
                Ok(TimeoutSolvedTable::build(
                    grid,
                    &load_tables(&config, &paths)?,
                ))
            })?;
            write_timeout_solved(&table, stdout.lock())?;
            for (group, indices) in &config.chart_groups {
                render::timeout_lines(
                    format!("timeout_vs_solved_{group}.png"),
                    &table.subset(&config.names_of(indices)),
                )?;
            }
        }
        "realizability" => {
            let table = load_or_build(REALIZABILITY_CACHE, || {
                Ok(RealizabilityTable::build(
                    &load_tables(&config, &paths)?,
                ))
            })?;
            write_realizability(&table, stdout.lock())?;
        }
        _ => return Err(eyre::eyre!("Unknown command `{command}`\n{USAGE}")),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_args_take_explicit_or_positional_index() {
        let explicit = TableArg::parse(1, "7=runs/compositional-minimal-syft.csv".to_string());
        assert_eq!(explicit.index, 7);
        assert_eq!(explicit.path, "runs/compositional-minimal-syft.csv");

        let positional = TableArg::parse(2, "runs/a=b.csv".to_string());
        assert_eq!(positional.index, 2);
        assert_eq!(positional.path, "runs/a=b.csv");
    }

    #[test]
    fn explicit_index_picks_random_benchmark_name() {
        let config = BenchConfig::random_benchmarks();
        let arg = TableArg::parse(1, "8=missing.csv".to_string());
        assert_eq!(config.display_name(arg.index), Some("compositional Syft"));
    }
}
