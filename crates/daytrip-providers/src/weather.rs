//! OpenWeatherMap-backed weather provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use daytrip_types::WeatherSnapshot;

use crate::error::{ProviderError, Result};
use crate::source::WeatherSource;

/// Default API base URL.
const DEFAULT_API_BASE: &str = "https://api.openweathermap.org";

/// Default timeout for requests.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for the weather provider.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Base URL for the API.
    pub base_url: String,

    /// Request timeout.
    pub timeout: Duration,
}

impl WeatherConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create config from environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENWEATHER_API_KEY").map_err(|_| {
            ProviderError::Config("OPENWEATHER_API_KEY environment variable not set".to_string())
        })?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Weather Provider
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP weather provider.
///
/// Single best-effort attempt per fetch: no retry, no caching, no
/// rate-limit handling.
pub struct WeatherProvider {
    client: Client,
    config: WeatherConfig,
}

impl WeatherProvider {
    /// Create a new weather provider with the given configuration.
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create a provider from environment configuration.
    pub fn from_env() -> Result<Self> {
        Self::new(WeatherConfig::from_env()?)
    }

    /// Perform the actual request; failures here become Absent.
    async fn try_fetch(&self, city: &str) -> Result<WeatherSnapshot> {
        let url = format!("{}/data/2.5/weather", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        parse_weather(&body)
    }
}

#[async_trait]
impl WeatherSource for WeatherProvider {
    async fn fetch(&self, city: &str) -> Option<WeatherSnapshot> {
        match self.try_fetch(city).await {
            Ok(snapshot) => {
                debug!(city = %city, description = %snapshot.description, "Weather fetched");
                Some(snapshot)
            }
            Err(e) => {
                warn!(city = %city, error = %e, "Weather fetch failed, treating as absent");
                None
            }
        }
    }

    fn name(&self) -> &str {
        "openweathermap"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Parsing
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, serde::Deserialize)]
struct ApiResponse {
    weather: Vec<ApiCondition>,
    main: ApiMain,
}

#[derive(Debug, serde::Deserialize)]
struct ApiCondition {
    description: String,
}

#[derive(Debug, serde::Deserialize)]
struct ApiMain {
    temp: f64,
    humidity: u8,
}

fn parse_weather(body: &str) -> Result<WeatherSnapshot> {
    let parsed: ApiResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Malformed("empty weather conditions".to_string()))?;

    Ok(WeatherSnapshot {
        description: condition.description,
        temperature_c: parsed.main.temp,
        humidity: parsed.main.humidity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weather_response() {
        let body = r#"{
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 22.4, "feels_like": 21.9, "pressure": 1012, "humidity": 50}
        }"#;

        let snapshot = parse_weather(body).unwrap();
        assert_eq!(snapshot.description, "clear sky");
        assert_eq!(snapshot.temperature_c, 22.4);
        assert_eq!(snapshot.humidity, 50);
    }

    #[test]
    fn test_parse_weather_empty_conditions() {
        let body = r#"{"weather": [], "main": {"temp": 22.4, "humidity": 50}}"#;
        assert!(matches!(
            parse_weather(body),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_weather_malformed() {
        assert!(parse_weather("not json").is_err());
        assert!(parse_weather(r#"{"cod": "404", "message": "city not found"}"#).is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = WeatherConfig::new("key")
            .with_base_url("http://localhost:9000")
            .with_timeout(Duration::from_secs(2));

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_absent() {
        // Port 9 (discard) with a tiny timeout; any failure must map to None
        let config = WeatherConfig::new("key")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_millis(200));
        let provider = WeatherProvider::new(config).unwrap();

        assert!(provider.fetch("Paris").await.is_none());
    }
}
