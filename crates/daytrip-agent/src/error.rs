//! Error types for the aggregator crate.

use thiserror::Error;

/// Result type alias using the planner error type.
pub type Result<T> = std::result::Result<T, PlanError>;

/// A failed planning cycle.
///
/// Variants distinguish storage failures, missing required context, and
/// generation failures so the presentation layer can show an accurate
/// message. No variant leaves a partial history entry behind.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The trip request failed validation.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] daytrip_types::ValidationError),

    /// The fact store was unreachable or rejected the preference write.
    /// Recoverable by retrying the whole request later.
    #[error("Storage failed: {0}")]
    Store(#[from] daytrip_memory::MemoryError),

    /// Weather could not be fetched. Weather is the one hard dependency;
    /// no itinerary is planned without it.
    #[error("Missing required context: weather for '{city}' is unavailable")]
    MissingWeather { city: String },

    /// The generation backend could not produce output.
    #[error("Generation failed: {0}")]
    Generation(#[from] daytrip_llm::GenerationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_weather_display() {
        let err = PlanError::MissingWeather {
            city: "Paris".to_string(),
        };
        assert!(err.to_string().contains("Missing required context"));
        assert!(err.to_string().contains("Paris"));
    }
}
