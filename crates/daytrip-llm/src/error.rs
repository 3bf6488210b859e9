//! Error types for the generation crate.

use thiserror::Error;

/// Result type alias using the generation error type.
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Errors that can occur while generating text.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Backend is misconfigured.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network failure or timeout.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Authentication failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Provider rate limit hit.
    #[error("Rate limited: {0}")]
    RateLimit(String),

    /// Backend returned an error response.
    #[error("Backend error: {0}")]
    Api(String),

    /// Response body could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backend produced no candidates.
    #[error("Empty response from backend")]
    EmptyResponse,
}
