//! Core error types for realms-core.
//!
//! The unlock engine itself never fails; errors only arise while building a
//! schedule from untrusted data or while loading and saving configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for realms-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors raised while building a schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Schedule must contain at least one milestone")]
    EmptySchedule,

    #[error("Duplicate milestone id {0}")]
    DuplicateMilestone(u32),

    /// Dates must be `YYYY-MM-DD` naming a real calendar day.
    #[error("Malformed milestone date '{0}' (expected YYYY-MM-DD)")]
    MalformedDate(String),

    #[error("No milestone with id {0}")]
    UnknownMilestone(u32),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
