//! Plain-text summary printed after a campaign or a `--load`.
use crate::report::ResultSet;

/// Divisor for the x100 fixed-point percentages and rates.
const PERCENT_DIVISOR: u64 = 100;

#[must_use]
pub fn summary_lines(result: &ResultSet) -> Vec<String> {
    let counts = result.summary.counts;
    let total = counts.total();
    let success_rate_x100 = if total > 0 {
        counts
            .success
            .saturating_mul(10_000)
            .checked_div(total)
            .unwrap_or(0)
    } else {
        0
    };

    let mut lines = Vec::new();
    lines.push(format!(
        "Target: {}:{} (user {}, {} mode)",
        result.config.host,
        result.config.port,
        result.config.user,
        result.config.mode.as_str()
    ));
    lines.push(format!("Status: {}", result.status.as_str()));
    lines.push(format!(
        "Duration: {}.{:03}s",
        result.summary.duration_ms / 1_000,
        result.summary.duration_ms % 1_000
    ));
    lines.push(format!(
        "Attempts: {} of {} configured",
        total, result.config.count
    ));
    lines.push(format!(
        "Successful: {} ({}.{:02}%)",
        counts.success,
        success_rate_x100 / PERCENT_DIVISOR,
        success_rate_x100 % PERCENT_DIVISOR
    ));
    lines.push(format!("Auth Failures: {}", counts.auth_failure));
    lines.push(format!("Connect Errors: {}", counts.connect_error));
    lines.push(format!("Timeouts: {}", counts.timeout));
    lines.push(format!("Protocol Errors: {}", counts.protocol_error));
    lines.push(format!(
        "Latency Min/Avg/Max: {} / {} / {}ms",
        result.summary.min_latency_ms,
        result.summary.avg_latency_ms,
        result.summary.max_latency_ms
    ));
    lines.push(format!(
        "Latency P50/P90/P99: {} / {} / {}ms",
        result.summary.p50_latency_ms,
        result.summary.p90_latency_ms,
        result.summary.p99_latency_ms
    ));
    lines.push(format!(
        "Achieved Rate: {}.{:02} attempts/s (target {})",
        result.summary.achieved_rate_x100 / PERCENT_DIVISOR,
        result.summary.achieved_rate_x100 % PERCENT_DIVISOR,
        result.config.rate
    ));
    lines.push(format!(
        "Peak In-Flight: {} (cap {})",
        result.summary.peak_in_flight, result.config.concurrency
    ));
    lines
}

pub fn print_summary(result: &ResultSet) {
    for line in summary_lines(result) {
        println!("{}", line);
    }
}
