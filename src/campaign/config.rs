use std::fmt;
use std::time::Duration;

use crate::args::ProbeMode;
use crate::error::ConfigError;

/// Fallback concurrency bound when the operator does not set one: ten
/// seconds' worth of arrivals at the target rate, clamped so a tiny rate
/// still gets useful parallelism and a huge one cannot exhaust the host.
const DERIVED_CONCURRENCY_WINDOW_SECS: f64 = 10.0;
const DERIVED_CONCURRENCY_MIN: usize = 16;
const DERIVED_CONCURRENCY_MAX: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Immutable description of one campaign. Validated before any attempt is
/// launched; a config that fails validation never reaches the runner loop.
#[derive(Debug, Clone)]
pub struct CampaignConfig {
    pub endpoint: Endpoint,
    pub user: String,
    /// Total attempts to launch.
    pub count: u64,
    /// Target attempt-start rate, attempts per second.
    pub rate: f64,
    /// Maximum in-flight attempts.
    pub concurrency: usize,
    /// Per-attempt deadline covering connect, authenticate, and probe.
    pub attempt_timeout: Duration,
    pub mode: ProbeMode,
    /// Directory listed by the sftp probe.
    pub sftp_path: String,
    /// Keep each session open this long before disconnecting.
    pub hold: Option<Duration>,
}

impl CampaignConfig {
    /// # Errors
    ///
    /// Returns the first violated constraint: count >= 1, rate positive and
    /// finite, concurrency >= 1, non-empty host, non-zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::CountZero);
        }
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(ConfigError::RateNotPositive { value: self.rate });
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ConcurrencyZero);
        }
        if self.endpoint.host.trim().is_empty() {
            return Err(ConfigError::HostEmpty);
        }
        if self.attempt_timeout.is_zero() {
            return Err(ConfigError::TimeoutZero);
        }
        Ok(())
    }
}

/// Concurrency bound used when `--concurrency` is not given.
#[must_use]
pub fn derived_concurrency(rate: f64) -> usize {
    if !rate.is_finite() || rate <= 0.0 {
        return DERIVED_CONCURRENCY_MIN;
    }
    let window = (rate * DERIVED_CONCURRENCY_WINDOW_SECS).ceil();
    if window >= DERIVED_CONCURRENCY_MAX as f64 {
        return DERIVED_CONCURRENCY_MAX;
    }
    (window as usize).clamp(DERIVED_CONCURRENCY_MIN, DERIVED_CONCURRENCY_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CampaignConfig {
        CampaignConfig {
            endpoint: Endpoint::new("example.com", 22),
            user: "root".to_owned(),
            count: 10,
            rate: 5.0,
            concurrency: 4,
            attempt_timeout: Duration::from_secs(10),
            mode: ProbeMode::Sftp,
            sftp_path: "/".to_owned(),
            hold: None,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn zero_count_is_rejected() {
        let mut config = base_config();
        config.count = 0;
        assert!(matches!(
            config.validate(),
            Err(crate::error::ConfigError::CountZero)
        ));
    }

    #[test]
    fn non_positive_rate_is_rejected() {
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut config = base_config();
            config.rate = rate;
            assert!(
                config.validate().is_err(),
                "rate {} should be rejected",
                rate
            );
        }
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let mut config = base_config();
        config.concurrency = 0;
        assert!(matches!(
            config.validate(),
            Err(crate::error::ConfigError::ConcurrencyZero)
        ));
    }

    #[test]
    fn empty_host_is_rejected() {
        let mut config = base_config();
        config.endpoint.host = "  ".to_owned();
        assert!(matches!(
            config.validate(),
            Err(crate::error::ConfigError::HostEmpty)
        ));
    }

    #[test]
    fn derived_concurrency_tracks_rate_within_bounds() {
        assert_eq!(derived_concurrency(0.5), 16);
        assert_eq!(derived_concurrency(10.0), 100);
        assert_eq!(derived_concurrency(1_000_000.0), 10_000);
    }
}
