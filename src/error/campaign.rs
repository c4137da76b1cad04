use thiserror::Error;

/// Campaign-fatal conditions. Per-attempt failures are never represented
/// here; they are recorded as outcomes in the result set.
#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("Failed to resolve target '{target}': {source}")]
    TargetUnresolvable {
        target: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Target '{target}' did not resolve to any address.")]
    TargetNoAddresses { target: String },
    #[error("Concurrency limiter closed unexpectedly.")]
    LimiterClosed,
    #[error("Result collector task failed: {source}")]
    CollectorFailed {
        #[source]
        source: tokio::task::JoinError,
    },
}
