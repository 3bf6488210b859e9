//! Configuration types.
//!
//! All sections default sensibly so a missing config file is equivalent to
//! an empty one. API keys resolve from the environment when not present in
//! the file, so secrets can stay out of it entirely.
//!
//! ```toml
//! [store]
//! db_path = "~/.config/daytrip/facts.db"
//!
//! [weather]
//! # api_key = "..."          # or OPENWEATHER_API_KEY
//!
//! [news]
//! # api_key = "..."          # or NEWSAPI_API_KEY
//!
//! [generation]
//! base_url = "http://localhost:8000"
//! model = "neo-gpt"
//! max_output_tokens = 1024
//! temperature = 0.7
//!
//! [prompt]
//! max_chars = 8000
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::paths;

/// Top-level daytrip configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub weather: ProviderConfig,
    pub news: ProviderConfig,
    pub generation: GenerationConfig,
    pub prompt: PromptConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load_default() -> Result<Self> {
        match paths::default_config_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }
}

/// Fact-store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file path. Default: `facts.db` under the config dir.
    pub db_path: Option<PathBuf>,
}

impl StoreConfig {
    /// Get the effective database path.
    pub fn effective_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(paths::default_db_path)
    }
}

/// Configuration shared by both context providers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API key; environment variables take precedence at resolution time.
    pub api_key: Option<String>,

    /// Override the provider's base URL.
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Resolve the API key: the given environment variable wins over the
    /// file value.
    pub fn resolve_api_key(&self, env_var: &str) -> Option<String> {
        std::env::var(env_var).ok().or_else(|| self.api_key.clone())
    }
}

/// Generation backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Base URL of the completions server.
    pub base_url: String,

    /// Model identifier to request.
    pub model: String,

    /// API key, if the server requires one.
    pub api_key: Option<String>,

    /// Maximum output length in tokens.
    pub max_output_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            model: "neo-gpt".to_string(),
            api_key: None,
            max_output_tokens: 1024,
            temperature: 0.7,
        }
    }
}

/// Prompt assembly configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Prompt character budget before prioritized truncation kicks in.
    pub max_chars: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self { max_chars: 8_000 }
    }
}
