//! Context source traits and mock implementations.

use async_trait::async_trait;
use chrono::NaiveDate;

use daytrip_types::{NewsDigest, WeatherSnapshot};

/// A best-effort source of current weather for a city.
///
/// `fetch` returns `None` on any failure (timeout, transport error,
/// non-success status, malformed body). Enrichment data is optional
/// context; callers decide whether absence is tolerable.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch current weather for a city, or `None` if unavailable.
    async fn fetch(&self, city: &str) -> Option<WeatherSnapshot>;

    /// Get the name of this source.
    fn name(&self) -> &str;
}

/// A best-effort source of recent news for a city and date.
///
/// Same Absent-on-failure contract as [`WeatherSource`].
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch recent news for a city on a date, or `None` if unavailable.
    async fn fetch(&self, city: &str, date: NaiveDate) -> Option<NewsDigest>;

    /// Get the name of this source.
    fn name(&self) -> &str;
}

// ─────────────────────────────────────────────────────────────────────────────
// Mock Sources
// ─────────────────────────────────────────────────────────────────────────────

/// Mock weather source returning a fixed snapshot (or nothing).
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Clone, Default)]
pub struct MockWeather {
    snapshot: Option<WeatherSnapshot>,
}

#[cfg(any(test, feature = "testing"))]
impl MockWeather {
    /// Source that always reports the given conditions.
    pub fn present(snapshot: WeatherSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
        }
    }

    /// Source that is always unavailable.
    pub fn absent() -> Self {
        Self { snapshot: None }
    }
}

#[cfg(any(test, feature = "testing"))]
#[async_trait]
impl WeatherSource for MockWeather {
    async fn fetch(&self, _city: &str) -> Option<WeatherSnapshot> {
        self.snapshot.clone()
    }

    fn name(&self) -> &str {
        "mock-weather"
    }
}

/// Mock news source returning a fixed digest (or nothing).
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Clone, Default)]
pub struct MockNews {
    digest: Option<NewsDigest>,
}

#[cfg(any(test, feature = "testing"))]
impl MockNews {
    /// Source that always reports the given digest.
    pub fn present(digest: NewsDigest) -> Self {
        Self {
            digest: Some(digest),
        }
    }

    /// Source that is always unavailable.
    pub fn absent() -> Self {
        Self { digest: None }
    }
}

#[cfg(any(test, feature = "testing"))]
#[async_trait]
impl NewsSource for MockNews {
    async fn fetch(&self, _city: &str, _date: NaiveDate) -> Option<NewsDigest> {
        self.digest.clone()
    }

    fn name(&self) -> &str {
        "mock-news"
    }
}
