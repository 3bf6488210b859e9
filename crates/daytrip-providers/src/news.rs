//! NewsAPI-backed news provider.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, warn};

use daytrip_types::{NewsArticle, NewsDigest};

use crate::error::{ProviderError, Result};
use crate::source::NewsSource;

/// Default API base URL.
const DEFAULT_API_BASE: &str = "https://newsapi.org";

/// Default timeout for requests.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for the news provider.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Base URL for the API.
    pub base_url: String,

    /// Request timeout.
    pub timeout: Duration,
}

impl NewsConfig {
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
        let api_key = std::env::var("NEWSAPI_API_KEY").map_err(|_| {
            ProviderError::Config("NEWSAPI_API_KEY environment variable not set".to_string())
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
// News Provider
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP news provider.
///
/// Queries the date-ranged everything endpoint sorted by popularity and
/// keeps the top three articles. Single best-effort attempt per fetch.
pub struct NewsProvider {
    client: Client,
    config: NewsConfig,
}

impl NewsProvider {
    /// Create a new news provider with the given configuration.
    pub fn new(config: NewsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create a provider from environment configuration.
    pub fn from_env() -> Result<Self> {
        Self::new(NewsConfig::from_env()?)
    }

    /// Perform the actual request; failures here become Absent.
    async fn try_fetch(&self, city: &str, date: NaiveDate) -> Result<NewsDigest> {
        let url = format!("{}/v2/everything", self.config.base_url);
        let day = date.format("%Y-%m-%d").to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("from", day.as_str()),
                ("to", day.as_str()),
                ("sortBy", "popularity"),
                ("apiKey", self.config.api_key.as_str()),
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
        parse_news(&body)
    }
}

#[async_trait]
impl NewsSource for NewsProvider {
    async fn fetch(&self, city: &str, date: NaiveDate) -> Option<NewsDigest> {
        match self.try_fetch(city, date).await {
            Ok(digest) if !digest.is_empty() => {
                debug!(city = %city, articles = digest.articles.len(), "News fetched");
                Some(digest)
            }
            Ok(_) => {
                debug!(city = %city, "No articles for this day, treating as absent");
                None
            }
            Err(e) => {
                warn!(city = %city, error = %e, "News fetch failed, treating as absent");
                None
            }
        }
    }

    fn name(&self) -> &str {
        "newsapi"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Parsing
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, serde::Deserialize)]
struct ApiResponse {
    articles: Vec<ApiArticle>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiArticle {
    title: String,
    source: ApiSource,
}

#[derive(Debug, serde::Deserialize)]
struct ApiSource {
    name: String,
}

fn parse_news(body: &str) -> Result<NewsDigest> {
    let parsed: ApiResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

    let articles = parsed
        .articles
        .into_iter()
        .map(|article| NewsArticle {
            title: article.title,
            source: article.source.name,
        })
        .collect();

    Ok(NewsDigest::from_articles(articles))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_news_keeps_top_three() {
        let body = r#"{
            "status": "ok",
            "totalResults": 4,
            "articles": [
                {"source": {"id": null, "name": "Le Monde"}, "title": "Festival opens"},
                {"source": {"id": null, "name": "AFP"}, "title": "Metro strike ends"},
                {"source": {"id": null, "name": "Reuters"}, "title": "Heatwave warning"},
                {"source": {"id": null, "name": "BBC"}, "title": "Museum reopens"}
            ]
        }"#;

        let digest = parse_news(body).unwrap();
        assert_eq!(digest.articles.len(), 3);
        assert_eq!(digest.articles[0].title, "Festival opens");
        assert_eq!(digest.articles[0].source, "Le Monde");
        assert_eq!(digest.articles[2].source, "Reuters");
    }

    #[test]
    fn test_parse_news_empty_articles() {
        let body = r#"{"status": "ok", "totalResults": 0, "articles": []}"#;
        let digest = parse_news(body).unwrap();
        assert!(digest.is_empty());
    }

    #[test]
    fn test_parse_news_malformed() {
        assert!(parse_news("not json").is_err());
        assert!(parse_news(r#"{"status": "error", "code": "apiKeyInvalid"}"#).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_absent() {
        let config = NewsConfig::new("key")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_millis(200));
        let provider = NewsProvider::new(config).unwrap();

        let date: NaiveDate = "2024-06-01".parse().unwrap();
        assert!(provider.fetch("Paris", date).await.is_none());
    }
}
