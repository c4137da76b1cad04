use chrono::Utc;
use tempfile::tempdir;

use super::*;
use crate::error::AppError;
use crate::metrics::{Outcome, OutcomeCounts};

fn sample_result_set() -> ResultSet {
    let records = vec![
        AttemptRecord {
            index: 0,
            offset_ms: 0,
            latency_ms: 52,
            auth_ms: Some(31),
            outcome: Outcome::Success,
        },
        AttemptRecord {
            index: 1,
            offset_ms: 100,
            latency_ms: 48,
            auth_ms: Some(29),
            outcome: Outcome::Success,
        },
        AttemptRecord {
            index: 2,
            offset_ms: 200,
            latency_ms: 10_000,
            auth_ms: None,
            outcome: Outcome::Timeout,
        },
    ];
    let summary = CampaignSummary {
        duration_ms: 10_300,
        counts: OutcomeCounts {
            success: 2,
            auth_failure: 0,
            connect_error: 0,
            timeout: 1,
            protocol_error: 0,
        },
        min_latency_ms: 48,
        max_latency_ms: 10_000,
        avg_latency_ms: 3_366,
        p50_latency_ms: 52,
        p90_latency_ms: 10_000,
        p99_latency_ms: 10_000,
        achieved_rate_x100: 29,
        peak_in_flight: 2,
    };
    ResultSet::new(
        ConfigSnapshot {
            host: "bastion.example.com".to_owned(),
            port: 22,
            user: "root".to_owned(),
            count: 3,
            rate: 10.0,
            concurrency: 100,
            timeout_ms: 10_000,
            mode: ProbeMode::Sftp,
            sftp_path: "/".to_owned(),
            hold_ms: None,
        },
        CampaignStatus::Completed,
        Utc::now(),
        records,
        summary,
    )
}

#[tokio::test]
async fn save_then_load_round_trips_exactly() -> crate::error::AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("results.json");
    let path = path.to_string_lossy().into_owned();

    let original = sample_result_set();
    save_result_set(&path, &original).await?;
    let loaded = load_result_set(&path).await?;

    assert_eq!(loaded, original);
    Ok(())
}

#[tokio::test]
async fn load_missing_file_fails_with_read_error() {
    let result = load_result_set("/definitely/missing/results.json").await;
    assert!(matches!(
        result,
        Err(AppError::Report(ReportError::Read { .. }))
    ));
}

#[tokio::test]
async fn load_garbage_fails_with_malformed_error() -> crate::error::AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("garbage.json");
    tokio::fs::write(&path, b"not json at all {{{").await?;

    let result = load_result_set(&path.to_string_lossy()).await;
    assert!(matches!(
        result,
        Err(AppError::Report(ReportError::Malformed { .. }))
    ));
    Ok(())
}

#[tokio::test]
async fn load_rejects_incompatible_versions() -> crate::error::AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("future.json");
    let path = path.to_string_lossy().into_owned();

    let mut value = serde_json::to_value(sample_result_set())?;
    value["version"] = serde_json::json!(99);
    tokio::fs::write(&path, serde_json::to_vec_pretty(&value)?).await?;

    let result = load_result_set(&path).await;
    assert!(matches!(
        result,
        Err(AppError::Report(ReportError::IncompatibleVersion {
            found: 99,
            ..
        }))
    ));
    Ok(())
}

#[test]
fn snapshot_from_config_omits_credentials() {
    let config = CampaignConfig {
        endpoint: crate::campaign::Endpoint::new("host.example.com", 2222),
        user: "deploy".to_owned(),
        count: 50,
        rate: 5.0,
        concurrency: 20,
        attempt_timeout: std::time::Duration::from_secs(5),
        mode: ProbeMode::Ssh,
        sftp_path: "/".to_owned(),
        hold: Some(std::time::Duration::from_millis(1500)),
    };
    let snapshot = ConfigSnapshot::from(&config);
    assert_eq!(snapshot.host, "host.example.com");
    assert_eq!(snapshot.port, 2222);
    assert_eq!(snapshot.user, "deploy");
    assert_eq!(snapshot.count, 50);
    assert_eq!(snapshot.concurrency, 20);
    assert_eq!(snapshot.timeout_ms, 5_000);
    assert_eq!(snapshot.hold_ms, Some(1_500));
}
