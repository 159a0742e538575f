//! Core error types for fitstreak-core.
//!
//! Errors are split by origin: local precondition violations in the
//! timer, failures of the remote session store, and configuration or
//! local-database problems. Everything fans into [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::TimerStatus;

/// Core error type for fitstreak-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer precondition violations
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Remote store failures
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Precondition violations in the session timer.
///
/// Reported synchronously to the caller, never silently swallowed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Session duration must be at least one second
    #[error("Invalid duration: {secs} seconds (must be > 0)")]
    InvalidDuration { secs: u64 },

    /// Command not valid in the current state
    #[error("Cannot {action} while {from:?}")]
    InvalidTransition {
        from: TimerStatus,
        action: &'static str,
    },
}

/// Failures of the remote session store and its preconditions.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No signed-in identity; fatal to the recording attempt, not retryable
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Latest-record query failed
    #[error("Store read failed: {message}")]
    Read { message: String },

    /// Record append failed
    #[error("Store write failed: {message}")]
    Write { message: String },

    /// Bounded wait on a store request elapsed
    #[error("Store request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Record payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
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

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
