use besyft_bench_lib::{BreakdownRow, ComparisonTable, Phase, TimeoutSolvedTable, PHASE_COUNT};
use eyre::Result;
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (1280, 720);
const FONT: (&str, u32) = ("sans-serif", 28);
const MIN_LOG_RUNTIME: f64 = 0.001;

fn label_of(labels: &[String], x: f64) -> String {
    labels.get(x.floor() as usize).cloned().unwrap_or_default()
}

/// Grouped bars, one group per instance and one bar per implementation.
pub fn comparison_bars<P: AsRef<Path>>(path: P, table: &ComparisonTable) -> Result<()> {
    let root = BitMapBackend::new(path.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let timeout = besyft_bench_lib::TIMEOUT;
    // timed out bars are cut at the top of the chart
    let y_max = table
        .rows
        .iter()
        .flat_map(|row| row.runtimes.iter().copied())
        .filter(|runtime| *runtime < timeout)
        .fold(1.0, f64::max)
        * 1.2;
    let bar_width = 0.8 / table.implementations.len().max(1) as f64;
    let labels = table.rows.iter().map(|r| r.instance_id()).collect::<Vec<_>>();

    let mut chart = ChartBuilder::on(&root)
        .caption("Running time per instance", FONT)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..table.rows.len() as f64, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(table.rows.len())
        .x_label_formatter(&|x| label_of(&labels, *x))
        .x_desc("Instance")
        .y_desc("Time (s)")
        .draw()?;

    for (i, name) in table.implementations.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(table.rows.iter().enumerate().map(|(x, row)| {
                let x0 = x as f64 + 0.1 + i as f64 * bar_width;
                let y = row.runtimes.get(i).copied().unwrap_or(timeout).min(y_max);
                Rectangle::new([(x0, 0.0), (x0 + bar_width, y)], color.filled())
            }))?
            .label(name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Log-scale running time against the number of requests, for one counter size.
pub fn scaling_lines<P: AsRef<Path>>(
    path: P,
    counter_size: u32,
    table: &ComparisonTable,
) -> Result<()> {
    let root = BitMapBackend::new(path.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let requests = table
        .rows
        .iter()
        .map(|r| f64::from(r.requests_count()))
        .collect::<Vec<_>>();
    let x_min = requests.iter().copied().fold(f64::INFINITY, f64::min).min(1.0);
    let x_max = requests.iter().copied().fold(0.0, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Performance on {counter_size}-bits counter games"),
            FONT,
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            x_min - 0.5..x_max + 0.5,
            (MIN_LOG_RUNTIME..besyft_bench_lib::TIMEOUT).log_scale(),
        )?;

    chart
        .configure_mesh()
        .x_desc("Environment requests (K)")
        .y_desc("Running time (s)")
        .draw()?;

    for (i, name) in table.implementations.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(
                table.rows.iter().filter_map(|row| {
                    let runtime = row.runtimes.get(i)?;
                    Some((
                        f64::from(row.requests_count()),
                        runtime.max(MIN_LOG_RUNTIME),
                    ))
                }),
                color.stroke_width(2),
            ))?
            .label(name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Horizontal stacked bars of the phase shares of each instance.
pub fn breakdown_bars<P: AsRef<Path>>(
    path: P,
    implementation: &str,
    rows: &[BreakdownRow],
) -> Result<()> {
    let root = BitMapBackend::new(path.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let labels = rows.iter().map(|r| r.instance.id()).collect::<Vec<_>>();
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Relative time cost of {implementation}"), FONT)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..1f64, 0f64..rows.len().max(1) as f64)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_labels(11)
        .x_label_formatter(&|x| format!("{:.0}%", x * 100.0))
        .y_labels(rows.len())
        .y_label_formatter(&|y| label_of(&labels, *y))
        .x_desc("Time (%)")
        .y_desc("Instance")
        .draw()?;

    for phase in 0..PHASE_COUNT {
        let color = Palette99::pick(phase).to_rgba();
        let name = Phase::from_repr(phase)
            .map(|p| p.to_string())
            .unwrap_or_default();
        chart
            .draw_series(rows.iter().enumerate().map(|(y, row)| {
                let start = row.fractions.0[..phase].iter().sum::<f64>();
                let end = start + row.fractions.0[phase];
                Rectangle::new(
                    [(start, y as f64 + 0.1), (end, y as f64 + 0.9)],
                    color.filled(),
                )
            }))?
            .label(name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Timeout against number of solved instances, one line per implementation.
pub fn timeout_lines<P: AsRef<Path>>(path: P, table: &TimeoutSolvedTable) -> Result<()> {
    let root = BitMapBackend::new(path.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let max_solved = table.counts.iter().flatten().copied().max().unwrap_or(0);
    let max_threshold = table.thresholds.last().copied().unwrap_or(1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Solved instances within timeout", FONT)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0usize..max_solved + 1, 0u32..max_threshold)?;

    chart
        .configure_mesh()
        .x_desc("Number of Solved Instances")
        .y_desc("Timeout (s)")
        .draw()?;

    for (i, (name, counts)) in table
        .implementations
        .iter()
        .zip(&table.counts)
        .enumerate()
    {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(
                counts.iter().copied().zip(table.thresholds.iter().copied()),
                color.stroke_width(2),
            ))?
            .label(name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
