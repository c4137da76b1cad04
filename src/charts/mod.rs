mod latency;
mod outcomes;

#[cfg(test)]
mod tests;

use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::error::AppResult;
use crate::report::ResultSet;

pub use latency::plot_attempt_latency;
pub use outcomes::plot_outcome_distribution;

/// Render every chart for a finalized result set into `path`.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or a chart
/// fails to render.
pub async fn render_charts(result: &ResultSet, path: &str) -> AppResult<()> {
    if result.records.is_empty() {
        info!("No records to plot");
        return Ok(());
    }

    fs::create_dir_all(Path::new(path)).await?;

    info!("Plotting attempt latency...");
    plot_attempt_latency(result, &format!("{}/attempt_latency.png", path))?;

    info!("Plotting outcome distribution...");
    plot_outcome_distribution(result, &format!("{}/outcome_distribution.png", path))?;

    info!("Charts written to {}", path);
    Ok(())
}
