use thiserror::Error;

/// Campaign configuration errors. A campaign whose configuration fails
/// validation never starts launching attempts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Attempt count must be >= 1.")]
    CountZero,
    #[error("Rate must be a positive, finite number of attempts per second (got {value}).")]
    RateNotPositive { value: f64 },
    #[error("Concurrency cap must be >= 1.")]
    ConcurrencyZero,
    #[error("Target host must not be empty.")]
    HostEmpty,
    #[error("Per-attempt timeout must be > 0.")]
    TimeoutZero,
}
