//! Request and response types for text generation.

use serde::{Deserialize, Serialize};

/// A single text-generation request.
///
/// The prompt must be passed through to the backend intact: prioritized
/// truncation is the aggregator's responsibility, never the adapter's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The fully assembled prompt.
    pub prompt: String,
    /// Maximum output length in tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl GenerationRequest {
    /// Create a new request.
    pub fn new(prompt: impl Into<String>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            temperature,
        }
    }
}

/// The generated text and the model that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Free-form natural-language output. Never parsed or validated
    /// structurally by this crate.
    pub text: String,
    /// Model identifier reported by the backend.
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_new() {
        let request = GenerationRequest::new("plan a day", 1024, 0.7);
        assert_eq!(request.prompt, "plan a day");
        assert_eq!(request.max_tokens, 1024);
        assert_eq!(request.temperature, 0.7);
    }
}
