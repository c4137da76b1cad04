use plotters::prelude::*;

use crate::error::AppResult;
use crate::report::ResultSet;

/// Latency per attempt index: one line for the full connect+auth cycle, one
/// for the authentication phase alone, with failed attempts marked on the
/// baseline.
pub fn plot_attempt_latency(result: &ResultSet, file_path: &str) -> AppResult<()> {
    let records = &result.records;
    if records.is_empty() {
        return Ok(());
    }

    let total_points: Vec<(u64, u64)> = records
        .iter()
        .filter(|record| record.outcome.is_success())
        .map(|record| (record.index, record.latency_ms))
        .collect();
    let auth_points: Vec<(u64, u64)> = records
        .iter()
        .filter(|record| record.outcome.is_success())
        .filter_map(|record| record.auth_ms.map(|auth_ms| (record.index, auth_ms)))
        .collect();
    let failed: Vec<u64> = records
        .iter()
        .filter(|record| !record.outcome.is_success())
        .map(|record| record.index)
        .collect();

    let x_max = records
        .last()
        .map(|record| record.index)
        .unwrap_or(0)
        .saturating_add(1);
    let y_peak = total_points
        .iter()
        .map(|&(_, latency)| latency)
        .max()
        .unwrap_or(1);
    let y_max = y_peak.saturating_add(y_peak / 4).max(1);

    let root = BitMapBackend::new(file_path, (1600, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Attempt Latency ({})", result.config.host),
            ("sans-serif", 30),
        )
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0u64..x_max, 0u64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Attempt")
        .y_desc("Latency (ms)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(total_points, &BLUE))?
        .label("Connection")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x.saturating_add(20), y)], BLUE));
    chart
        .draw_series(LineSeries::new(auth_points, &GREEN))?
        .label("Authentication")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x.saturating_add(20), y)], GREEN));
    chart
        .draw_series(
            failed
                .iter()
                .map(|&index| Cross::new((index, 0u64), 6, &RED)),
        )?
        .label(format!("Failed ({})", failed.len()))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x.saturating_add(20), y)], RED));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}
