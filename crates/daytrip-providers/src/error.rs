//! Error types for the providers crate.
//!
//! Provider failures never propagate out of a fetch: the public contract
//! is Absent-on-failure. These errors exist for the internal request path
//! and for logging.

use thiserror::Error;

/// Errors that can occur while querying an external context provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network failure or timeout.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be parsed.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Provider is misconfigured.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
