use std::collections::BTreeMap;

use plotters::prelude::*;

use crate::error::AppResult;
use crate::metrics::Outcome;
use crate::report::ResultSet;

const OUTCOME_SERIES: [(Outcome, RGBColor); 5] = [
    (Outcome::Success, GREEN),
    (Outcome::AuthFailure, MAGENTA),
    (Outcome::ConnectError, RED),
    (Outcome::Timeout, BLUE),
    (Outcome::ProtocolError, BLACK),
];

/// Attempts per second, one line per outcome kind. Outcomes that never
/// occurred are left off the chart.
pub fn plot_outcome_distribution(result: &ResultSet, file_path: &str) -> AppResult<()> {
    let records = &result.records;
    if records.is_empty() {
        return Ok(());
    }

    let mut totals: BTreeMap<u64, u64> = BTreeMap::new();
    for record in records {
        let count = totals.entry(record.offset_ms / 1000).or_insert(0);
        *count = count.saturating_add(1);
    }
    let max_sec = totals.keys().last().copied().unwrap_or(0);
    let y_max = totals.values().copied().max().unwrap_or(1);

    let root = BitMapBackend::new(file_path, (1600, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Outcomes Over Time ({})", result.config.host),
            ("sans-serif", 30),
        )
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0u64..max_sec.saturating_add(1), 0u64..y_max.saturating_add(1))?;

    chart
        .configure_mesh()
        .x_desc("Elapsed Time (s)")
        .y_desc("Attempts")
        .draw()?;

    for (outcome, color) in OUTCOME_SERIES {
        let mut per_second: BTreeMap<u64, u64> = BTreeMap::new();
        for record in records.iter().filter(|record| record.outcome == outcome) {
            let count = per_second.entry(record.offset_ms / 1000).or_insert(0);
            *count = count.saturating_add(1);
        }
        if per_second.is_empty() {
            continue;
        }

        let points: Vec<(u64, u64)> = (0..=max_sec)
            .map(|sec| (sec, per_second.get(&sec).copied().unwrap_or(0)))
            .collect();
        chart
            .draw_series(LineSeries::new(points, &color))?
            .label(outcome.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x.saturating_add(20), y)], color)
            });
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}
