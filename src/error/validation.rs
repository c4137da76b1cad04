use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing target host (set --target).")]
    MissingTarget,
    #[error("Either an SSH key or a password must be provided.")]
    MissingCredential,
    #[error("SSH key not found at '{path}'.")]
    KeyNotFound { path: PathBuf },
    #[error("Failed to load SSH key '{path}': {source}")]
    KeyUnreadable {
        path: PathBuf,
        #[source]
        source: russh::keys::Error,
    },
    #[error("`--load` cannot be combined with `--output`.")]
    LoadWithOutput,
    #[error("`--load` cannot be combined with `--target`.")]
    LoadWithTarget,
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid rate '{value}'. Expected a positive number of attempts per second.")]
    InvalidRate { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Failed to send shutdown")]
    ShutdownSendFailed,
    #[error("Shutdown task join error: {source}")]
    ShutdownJoinFailed {
        #[source]
        source: tokio::task::JoinError,
    },
}
