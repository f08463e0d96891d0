//! Core error types for snapsift-core.
//!
//! Configuration problems are the only fatal errors in this crate: a bad
//! decay window or a malformed threshold table is rejected at construction
//! time, before any session exists. Clock anomalies at runtime are not
//! errors; the tracker degrades them to a streak restart.

use std::path::PathBuf;
use thiserror::Error;

use crate::combo::ComboLevel;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Config directory could not be resolved or created
    #[error("Failed to resolve configuration directory: {0}")]
    DirUnavailable(String),

    /// Decay window must be a positive duration
    #[error("Invalid decay window: must be positive, got {0} ms")]
    ZeroDecayWindow(u64),

    /// Decay window beyond the supported range
    #[error("Invalid decay window: must be at most {max} ms, got {got} ms")]
    DecayWindowTooLong { got: u64, max: u64 },

    /// Threshold table has no rows
    #[error("Invalid threshold table: must not be empty")]
    EmptyThresholds,

    /// Threshold table leaves low counts unclassified
    #[error("Invalid threshold table: first row must start at count 0, got {0}")]
    ThresholdsNotFromZero(u32),

    /// Count 0 must classify to the cold level
    #[error("Invalid threshold table: count 0 must map to none, got {0}")]
    BaseLevelNotNone(ComboLevel),

    /// Threshold counts out of order
    #[error("Invalid threshold table: counts must be strictly increasing, got {prev} then {next}")]
    UnorderedThresholdCounts { prev: u32, next: u32 },

    /// Threshold levels out of order
    #[error("Invalid threshold table: levels must escalate, got {prev} then {next}")]
    UnorderedThresholdLevels { prev: ComboLevel, next: ComboLevel },
}

/// Result type alias for ConfigError
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
