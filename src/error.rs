//! Error types shared across the analysis pipeline
//!
//! Library code returns typed errors; the CLI wraps them in `anyhow` with
//! context at the application boundary.

use thiserror::Error;

/// Errors produced by trace parsing, graph construction, and classification
#[derive(Debug, Error)]
pub enum MemGraphError {
    /// Invalid configuration detected at construction time.
    ///
    /// Raised before any work happens; no partial state is left behind.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Malformed trace input (bad record, unknown format, missing header)
    #[error("trace format error: {0}")]
    TraceFormat(String),

    /// An internal invariant was broken; indicates a bug, not bad input
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Analysis was cancelled by the caller's token
    #[error("analysis cancelled")]
    Cancelled,

    /// Underlying I/O failure while reading or writing a trace file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the library
pub type Result<T> = std::result::Result<T, MemGraphError>;

impl MemGraphError {
    /// Build a configuration error from anything displayable
    pub fn config(msg: impl std::fmt::Display) -> Self {
        MemGraphError::Configuration(msg.to_string())
    }

    /// Build a trace format error from anything displayable
    pub fn trace_format(msg: impl std::fmt::Display) -> Self {
        MemGraphError::TraceFormat(msg.to_string())
    }
}
