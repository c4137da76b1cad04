//! The persisted result set: one campaign's configuration snapshot, attempt
//! records, and summary, as pretty JSON that round-trips exactly through
//! save and load.
#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::args::ProbeMode;
use crate::campaign::CampaignConfig;
use crate::error::{AppError, AppResult, ReportError};
use crate::metrics::{AttemptRecord, CampaignStatus, CampaignSummary};

pub const FORMAT_VERSION: u32 = 1;

/// The campaign configuration as persisted. Credential material is
/// deliberately absent; only the username is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub count: u64,
    pub rate: f64,
    pub concurrency: u64,
    pub timeout_ms: u64,
    pub mode: ProbeMode,
    pub sftp_path: String,
    pub hold_ms: Option<u64>,
}

impl From<&CampaignConfig> for ConfigSnapshot {
    fn from(config: &CampaignConfig) -> Self {
        Self {
            host: config.endpoint.host.clone(),
            port: config.endpoint.port,
            user: config.user.clone(),
            count: config.count,
            rate: config.rate,
            concurrency: u64::try_from(config.concurrency).unwrap_or(u64::MAX),
            timeout_ms: u64::try_from(config.attempt_timeout.as_millis()).unwrap_or(u64::MAX),
            mode: config.mode,
            sftp_path: config.sftp_path.clone(),
            hold_ms: config
                .hold
                .map(|hold| u64::try_from(hold.as_millis()).unwrap_or(u64::MAX)),
        }
    }
}

/// A finalized campaign. Immutable; the unit of persistence and rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub version: u32,
    pub config: ConfigSnapshot,
    pub status: CampaignStatus,
    pub started_at: DateTime<Utc>,
    /// Attempt records in launch (index) order.
    pub records: Vec<AttemptRecord>,
    pub summary: CampaignSummary,
}

impl ResultSet {
    #[must_use]
    pub fn new(
        config: ConfigSnapshot,
        status: CampaignStatus,
        started_at: DateTime<Utc>,
        records: Vec<AttemptRecord>,
        summary: CampaignSummary,
    ) -> Self {
        Self {
            version: FORMAT_VERSION,
            config,
            status,
            started_at,
            records,
            summary,
        }
    }
}

/// Write a result set as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub async fn save_result_set(path: &str, result: &ResultSet) -> AppResult<()> {
    let json = serde_json::to_vec_pretty(result)
        .map_err(|source| AppError::report(ReportError::Serialize { source }))?;
    tokio::fs::write(path, json).await.map_err(|source| {
        AppError::report(ReportError::Write {
            path: path.to_owned(),
            source,
        })
    })?;
    Ok(())
}

/// Load a previously saved result set for rendering.
///
/// # Errors
///
/// Returns an error when the file cannot be read, is not valid result JSON,
/// or was written with an incompatible format version.
pub async fn load_result_set(path: &str) -> AppResult<ResultSet> {
    let bytes = tokio::fs::read(path).await.map_err(|source| {
        AppError::report(ReportError::Read {
            path: path.to_owned(),
            source,
        })
    })?;
    let result: ResultSet = serde_json::from_slice(&bytes).map_err(|source| {
        AppError::report(ReportError::Malformed {
            path: path.to_owned(),
            source,
        })
    })?;
    if result.version != FORMAT_VERSION {
        return Err(AppError::report(ReportError::IncompatibleVersion {
            path: path.to_owned(),
            found: result.version,
            expected: FORMAT_VERSION,
        }));
    }
    Ok(result)
}
