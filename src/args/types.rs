use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::num::{NonZeroU64, NonZeroUsize};

use crate::error::{AppError, ValidationError};

/// What the executor does with a connection after authentication succeeds.
#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMode {
    /// Open a session channel over the authenticated connection.
    Ssh,
    /// Open the SFTP subsystem and list a directory.
    Sftp,
}

impl ProbeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ProbeMode::Ssh => "ssh",
            ProbeMode::Sftp => "sftp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveU64(NonZeroU64);

impl PositiveU64 {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for PositiveU64 {
    type Error = AppError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        NonZeroU64::new(value)
            .map(Self)
            .ok_or_else(|| AppError::validation(ValidationError::ValueTooSmall { min: 1 }))
    }
}

impl std::str::FromStr for PositiveU64 {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u64 = s
            .trim()
            .parse()
            .map_err(|source| AppError::validation(ValidationError::InvalidNumber { source }))?;
        Self::try_from(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PositiveUsize {
    type Error = AppError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or_else(|| AppError::validation(ValidationError::ValueTooSmall { min: 1 }))
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|source| AppError::validation(ValidationError::InvalidNumber { source }))?;
        Self::try_from(value)
    }
}
