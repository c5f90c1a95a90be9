use crate::{match_runtime, BenchConfig, GoalFamily, Instance, TrialRecord};
use tracing::debug;

/// A loaded raw table together with the name its column is shown under.
#[derive(Debug, Clone, PartialEq)]
pub struct ImplementationTable {
    pub name: String,
    pub records: Vec<TrialRecord>,
}

impl ImplementationTable {
    pub fn new(name: impl Into<String>, records: Vec<TrialRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub instance: Instance,
    /// One runtime per implementation, in table order.
    pub runtimes: Vec<f64>,
}

impl ComparisonRow {
    pub fn instance_id(&self) -> String {
        self.instance.id()
    }

    pub fn requests_count(&self) -> u32 {
        self.instance.requests
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonTable {
    pub implementations: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// Runtimes of one implementation column, in row order.
    pub fn column(&self, implementation: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows
            .iter()
            .filter_map(move |row| row.runtimes.get(implementation).copied())
    }
}

/// Non-dominance rows for every request count, then dominance rows, at the configured counter size.
pub fn build_comparison(config: &BenchConfig, tables: &[ImplementationTable]) -> ComparisonTable {
    let mut table = family_table(config, GoalFamily::NonDominance, config.counter_size, tables);
    table.rows.extend(
        family_table(config, GoalFamily::Dominance, config.counter_size, tables).rows,
    );
    debug!(rows = table.rows.len(), "built comparison table");
    table
}

/// One row per request count for a single goal family and counter size.
pub fn build_family_scaling(
    config: &BenchConfig,
    family: GoalFamily,
    counter_size: u32,
    tables: &[ImplementationTable],
) -> ComparisonTable {
    family_table(config, family, counter_size, tables)
}

fn family_table(
    config: &BenchConfig,
    family: GoalFamily,
    counter_size: u32,
    tables: &[ImplementationTable],
) -> ComparisonTable {
    let goal_file = family.goal_file(counter_size);
    let rows = config
        .requests
        .clone()
        .map(|requests| {
            let instance = Instance::new(family, requests);
            let env_file = instance.env_file();
            ComparisonRow {
                instance,
                runtimes: tables
                    .iter()
                    .map(|table| {
                        match_runtime(
                            &goal_file,
                            &env_file,
                            &table.records,
                            config.match_mode,
                            config.timeout,
                        )
                    })
                    .collect(),
            }
        })
        .collect();

    ComparisonTable {
        implementations: tables.iter().map(|t| t.name.clone()).collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_csv, TIMEOUT};

    fn tables() -> Vec<ImplementationTable> {
        let direct = "\
D,goal_8.ltlf,env_1.ltlf,Agent,1,1,1,1,1,5,Adv,Dom
D,goal_8.ltlf,env_2.ltlf,Agent,1,1,1,1,1,6,Unr,Dom
D,goal_dominance_8.ltlf,env_1.ltlf,Agent,1,1,1,1,1,7,Coop,Dom
D,goal_7.ltlf,env_3.ltlf,Agent,1,1,1,1,1,9,Adv,Dom
";
        let compositional = "\
C,goal_8.ltlf,env_1.ltlf,Agent,1,1,1,1,1,2,Adv,Dom
C,goal_dominance_8.ltlf,env_10.ltlf,Agent,1,1,1,1,1,3,Coop,NoDom
";
        vec![
            ImplementationTable::new("direct", parse_csv(direct.as_bytes()).unwrap()),
            ImplementationTable::new(
                "compositional",
                parse_csv(compositional.as_bytes()).unwrap(),
            ),
        ]
    }

    #[test]
    fn has_two_rows_per_request_count() {
        let table = build_comparison(&BenchConfig::default(), &tables());
        assert_eq!(table.rows.len(), 20);
        assert_eq!(table.implementations, ["direct", "compositional"]);
        for (i, row) in table.rows.iter().enumerate() {
            let id = row.instance_id();
            let (prefix, k) = id.split_once('-').unwrap();
            assert_eq!(prefix, if i < 10 { "ND" } else { "D" });
            assert_eq!(k.parse::<u32>().unwrap(), row.requests_count());
            assert_eq!(row.requests_count() as usize, i % 10 + 1);
        }
    }

    #[test]
    fn missing_instances_time_out() {
        let table = build_comparison(&BenchConfig::default(), &tables());
        assert_eq!(table.rows[0].runtimes, [5.0, 2.0]);
        assert_eq!(table.rows[1].runtimes, [6.0, TIMEOUT]);
        // goal_7 is not the configured counter size
        assert_eq!(table.rows[2].runtimes, [TIMEOUT, TIMEOUT]);
        assert_eq!(table.rows[10].runtimes, [7.0, TIMEOUT]);
        assert_eq!(table.rows[19].runtimes, [TIMEOUT, 3.0]);
        assert_eq!(table.column(1).filter(|t| *t < TIMEOUT).count(), 2);
    }

    #[test]
    fn scaling_uses_requested_counter_size() {
        let table = build_family_scaling(
            &BenchConfig::default(),
            GoalFamily::NonDominance,
            7,
            &tables(),
        );
        assert_eq!(table.rows.len(), 10);
        assert_eq!(table.rows[2].runtimes, [9.0, TIMEOUT]);
    }
}
