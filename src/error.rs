//! Error types for QuillKV
//!
//! Provides a unified error type for all engine operations.

use thiserror::Error;

/// Result type alias using QuillError
pub type Result<T> = std::result::Result<T, QuillError>;

/// Unified error type for QuillKV operations
#[derive(Debug, Error)]
pub enum QuillError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Log Errors
    // -------------------------------------------------------------------------
    /// A record before the end of the log could not be decoded
    #[error("Log corruption at line {line} (byte offset {offset}): {reason}")]
    LogCorruption {
        line: u64,
        offset: u64,
        reason: String,
    },

    /// A failed append left bytes behind that could not be rolled back
    #[error("Log writer poisoned by an earlier failed append")]
    LogPoisoned,

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuillError {
    /// True for errors raised while replaying the log at startup
    pub fn is_corruption(&self) -> bool {
        matches!(self, QuillError::LogCorruption { .. })
    }
}
