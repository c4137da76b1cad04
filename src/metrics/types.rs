use serde::{Deserialize, Serialize};

/// Terminal classification of one connection attempt. Closed set: every
/// transport failure must be triaged onto one of these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Handshake and authentication both completed.
    Success,
    /// The transport connected but the credential was rejected.
    AuthFailure,
    /// Network-level failure before authentication could be attempted.
    ConnectError,
    /// No completion within the per-attempt deadline.
    Timeout,
    /// Malformed or unexpected protocol behavior.
    ProtocolError,
}

impl Outcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::AuthFailure => "auth_failure",
            Outcome::ConnectError => "connect_error",
            Outcome::Timeout => "timeout",
            Outcome::ProtocolError => "protocol_error",
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// One completed connection attempt. Immutable once created; `index` is
/// assigned at launch so the record keeps its place in the intended schedule
/// even when attempts complete out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub index: u64,
    /// Launch instant, milliseconds since campaign start.
    pub offset_ms: u64,
    /// Completion minus launch.
    pub latency_ms: u64,
    /// Time until authentication completed; None when the attempt failed
    /// before authenticating.
    pub auth_ms: Option<u64>,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub success: u64,
    pub auth_failure: u64,
    pub connect_error: u64,
    pub timeout: u64,
    pub protocol_error: u64,
}

impl OutcomeCounts {
    pub fn bump(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success => self.success = self.success.saturating_add(1),
            Outcome::AuthFailure => self.auth_failure = self.auth_failure.saturating_add(1),
            Outcome::ConnectError => self.connect_error = self.connect_error.saturating_add(1),
            Outcome::Timeout => self.timeout = self.timeout.saturating_add(1),
            Outcome::ProtocolError => self.protocol_error = self.protocol_error.saturating_add(1),
        }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.success
            + self.auth_failure
            + self.connect_error
            + self.timeout
            + self.protocol_error
    }

    #[must_use]
    pub const fn failed(&self) -> u64 {
        self.total() - self.success
    }
}

/// Point-in-time view of a running campaign, for progress reporting.
#[derive(Debug, Clone, Copy)]
pub struct ProgressSnapshot {
    pub completed: u64,
    pub counts: OutcomeCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    /// All configured attempts launched and completed.
    Completed,
    /// Cancelled mid-run; the record list may be shorter than the
    /// configured count.
    Cancelled,
}

impl CampaignStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CampaignStatus::Completed => "completed",
            CampaignStatus::Cancelled => "cancelled",
        }
    }
}

/// Summary statistics derived from the records at finalize time. Rates are
/// stored fixed-point x100 so the persisted form round-trips exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub duration_ms: u64,
    pub counts: OutcomeCounts,
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    pub avg_latency_ms: u64,
    pub p50_latency_ms: u64,
    pub p90_latency_ms: u64,
    pub p99_latency_ms: u64,
    /// Observed attempt-start rate, attempts per second x100.
    pub achieved_rate_x100: u64,
    pub peak_in_flight: u64,
}
