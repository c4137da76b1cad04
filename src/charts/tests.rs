use chrono::Utc;
use tempfile::tempdir;

use super::*;
use crate::args::ProbeMode;
use crate::error::AppResult;
use crate::metrics::{
    AttemptRecord, CampaignStatus, CampaignSummary, Outcome, OutcomeCounts,
};
use crate::report::{ConfigSnapshot, ResultSet};

fn sample_result_set() -> ResultSet {
    let records = vec![
        AttemptRecord {
            index: 0,
            offset_ms: 0,
            latency_ms: 40,
            auth_ms: Some(25),
            outcome: Outcome::Success,
        },
        AttemptRecord {
            index: 1,
            offset_ms: 100,
            latency_ms: 55,
            auth_ms: Some(30),
            outcome: Outcome::Success,
        },
        AttemptRecord {
            index: 2,
            offset_ms: 1_200,
            latency_ms: 20,
            auth_ms: None,
            outcome: Outcome::AuthFailure,
        },
        AttemptRecord {
            index: 3,
            offset_ms: 2_400,
            latency_ms: 10_000,
            auth_ms: None,
            outcome: Outcome::Timeout,
        },
    ];
    ResultSet::new(
        ConfigSnapshot {
            host: "target.example.com".to_owned(),
            port: 22,
            user: "root".to_owned(),
            count: 4,
            rate: 10.0,
            concurrency: 16,
            timeout_ms: 10_000,
            mode: ProbeMode::Sftp,
            sftp_path: "/".to_owned(),
            hold_ms: None,
        },
        CampaignStatus::Completed,
        Utc::now(),
        records,
        CampaignSummary {
            duration_ms: 12_400,
            counts: OutcomeCounts {
                success: 2,
                auth_failure: 1,
                connect_error: 0,
                timeout: 1,
                protocol_error: 0,
            },
            min_latency_ms: 20,
            max_latency_ms: 10_000,
            avg_latency_ms: 2_528,
            p50_latency_ms: 55,
            p90_latency_ms: 10_000,
            p99_latency_ms: 10_000,
            achieved_rate_x100: 32,
            peak_in_flight: 2,
        },
    )
}

#[tokio::test]
async fn render_charts_writes_both_files() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().to_string_lossy().into_owned();

    render_charts(&sample_result_set(), &path).await?;

    assert!(dir.path().join("attempt_latency.png").is_file());
    assert!(dir.path().join("outcome_distribution.png").is_file());
    Ok(())
}

#[tokio::test]
async fn render_charts_with_no_records_is_a_noop() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("never-created");
    let mut result = sample_result_set();
    result.records.clear();

    render_charts(&result, &path.to_string_lossy()).await?;

    assert!(!path.exists());
    Ok(())
}
