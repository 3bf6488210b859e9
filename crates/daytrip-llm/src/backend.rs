//! Generation backend trait and mock implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{GenerationRequest, GenerationResponse};

/// Trait for text-generation backends.
///
/// Implementations wrap an opaque, potentially slow text-completion
/// capability. The contract blocks until completion or provider-level
/// failure; no cancellation semantics are layered on here.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Execute a generation request and return the full response.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse>;

    /// Get the name of this backend.
    fn name(&self) -> &str;
}

/// A shared, type-erased backend handle.
pub type SharedBackend = Arc<dyn GenerationBackend>;

// ─────────────────────────────────────────────────────────────────────────────
// Mock Backend
// ─────────────────────────────────────────────────────────────────────────────

/// Mock generation backend for testing.
///
/// Returns a fixed reply (or a scripted failure) and records every prompt
/// it was asked to complete.
#[cfg(any(test, feature = "testing"))]
pub struct MockGenerator {
    reply: Option<String>,
    prompts: std::sync::Mutex<Vec<String>>,
}

#[cfg(any(test, feature = "testing"))]
impl MockGenerator {
    /// Backend that always returns the given text.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Backend that always fails.
    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Prompts seen so far, in call order.
    pub fn seen_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[cfg(any(test, feature = "testing"))]
#[async_trait]
impl GenerationBackend for MockGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        self.prompts.lock().unwrap().push(request.prompt);

        match &self.reply {
            Some(text) => Ok(GenerationResponse {
                text: text.clone(),
                model: "mock".to_string(),
            }),
            None => Err(crate::error::GenerationError::Api(
                "mock backend scripted to fail".to_string(),
            )),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_reply() {
        let backend = MockGenerator::with_reply("Your itinerary");

        let response = backend
            .generate(GenerationRequest::new("plan", 100, 0.7))
            .await
            .unwrap();

        assert_eq!(response.text, "Your itinerary");
        assert_eq!(backend.seen_prompts(), vec!["plan"]);
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let backend = MockGenerator::failing();
        let result = backend.generate(GenerationRequest::new("plan", 100, 0.7)).await;
        assert!(result.is_err());
    }
}
