//! OpenAI-compatible completions backend.
//!
//! Talks to any server exposing the `/v1/completions` shape, which covers
//! hosted APIs as well as local model runners. One candidate per request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, header};
use tracing::debug;

use crate::backend::GenerationBackend;
use crate::error::{GenerationError, Result};
use crate::types::{GenerationRequest, GenerationResponse};

/// Default timeout for requests. Generation can be slow on constrained
/// hardware.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for the completions backend.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Base URL of the completions server.
    pub base_url: String,

    /// Model identifier to request.
    pub model: String,

    /// API key, if the server requires one.
    pub api_key: Option<String>,

    /// Request timeout.
    pub timeout: Duration,
}

impl CompletionConfig {
    /// Create a new config for the given server and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create config from environment variables.
    ///
    /// Looks for `DAYTRIP_LLM_URL`, `DAYTRIP_LLM_MODEL`, and optionally
    /// `DAYTRIP_LLM_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("DAYTRIP_LLM_URL").map_err(|_| {
            GenerationError::Config("DAYTRIP_LLM_URL environment variable not set".to_string())
        })?;
        let model = std::env::var("DAYTRIP_LLM_MODEL").map_err(|_| {
            GenerationError::Config("DAYTRIP_LLM_MODEL environment variable not set".to_string())
        })?;

        let mut config = Self::new(base_url, model);
        if let Ok(key) = std::env::var("DAYTRIP_LLM_API_KEY") {
            config.api_key = Some(key);
        }
        Ok(config)
    }

    /// Set an API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Completion Backend
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP completions backend.
pub struct CompletionBackend {
    client: Client,
    config: CompletionConfig,
}

impl CompletionBackend {
    /// Create a new backend with the given configuration.
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                GenerationError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Create a backend from environment configuration.
    pub fn from_env() -> Result<Self> {
        Self::new(CompletionConfig::from_env()?)
    }

    /// Build the completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/v1/completions", self.config.base_url)
    }

    /// Add authentication and content headers to a request.
    fn add_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.header(header::CONTENT_TYPE, "application/json");
        match &self.config.api_key {
            Some(key) => builder.header(header::AUTHORIZATION, format!("Bearer {}", key)),
            None => builder,
        }
    }

    /// Handle a response, mapping error statuses onto the taxonomy.
    async fn handle_response(response: Response) -> Result<GenerationResponse> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = parse_error_message(&body).unwrap_or_else(|| body.clone());

            return Err(match status.as_u16() {
                401 | 403 => GenerationError::Auth(message),
                429 => GenerationError::RateLimit(message),
                _ => GenerationError::Api(format!("HTTP {}: {}", status, message)),
            });
        }

        let body = response.text().await?;
        let parsed: ApiResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::Serialization(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(GenerationError::EmptyResponse)?;

        Ok(GenerationResponse {
            text: choice.text,
            model: parsed.model,
        })
    }
}

#[async_trait]
impl GenerationBackend for CompletionBackend {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let payload = ApiRequest {
            model: &self.config.model,
            prompt: &request.prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            n: 1,
        };

        debug!(
            model = %self.config.model,
            prompt_chars = request.prompt.len(),
            "Sending completion request"
        );

        let response = self
            .add_headers(self.client.post(self.completions_url()))
            .json(&payload)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    fn name(&self) -> &str {
        "completions"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// API Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    n: u32,
}

#[derive(Debug, serde::Deserialize)]
struct ApiResponse {
    model: String,
    choices: Vec<ApiChoice>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiChoice {
    text: String,
}

#[derive(Debug, serde::Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiError>(body)
        .ok()
        .map(|e| e.error.message)
}
