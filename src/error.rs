//! Error types for the fact generation pipeline.
//!
//! Every failure surfaced to the user falls into one of a small set of
//! categories. Errors abort the current run only; the interactive menu
//! stays available for the next attempt.

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, FactsError>;

/// Pipeline errors.
#[derive(Debug, Error)]
pub enum FactsError {
    /// Configuration error (missing API key, unreadable config file).
    /// Fatal at startup, before any network call is attempted.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout).
    #[error("Network error: {0}. Check your internet connection and credentials.")]
    Network(String),

    /// API error (non-2xx response from a provider).
    #[error("API error: {0}")]
    Api(String),

    /// Provider signaled throttling (HTTP 429).
    #[error("Rate limited: {0}. Wait a moment and retry.")]
    RateLimited(String),

    /// Parse error (a provider reply could not be decoded into
    /// questions, answers, or facts).
    #[error("Parse error: {0}. Try a simpler topic.")]
    Parse(String),

    /// Filesystem error while writing or scanning fact files.
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}
