//! Ephemeral context types fetched fresh for each planning request.

use serde::{Deserialize, Serialize};

/// Current weather conditions for a city.
///
/// Fetched per request and surfaced in the generation prompt; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Short description (e.g., "clear sky").
    pub description: String,
    /// Temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Relative humidity in percent.
    pub humidity: u8,
}

/// A single news article headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    /// Name of the publishing source.
    pub source: String,
}

/// Recent news for a city and date, most-popular-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsDigest {
    pub articles: Vec<NewsArticle>,
}

/// Maximum number of articles carried in a digest.
pub const MAX_DIGEST_ARTICLES: usize = 3;

impl NewsDigest {
    /// Build a digest from a list of articles, keeping at most the first
    /// three (the source is already sorted most-popular-first).
    pub fn from_articles(articles: Vec<NewsArticle>) -> Self {
        let mut articles = articles;
        articles.truncate(MAX_DIGEST_ARTICLES);
        Self { articles }
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// A typed, directed edge from a user to a named entity.
///
/// Records a prior interaction or attribute (e.g., `VISITED: Louvre`).
/// Duplicate edges of the same type to the same entity are tolerated,
/// and ordering across fetches is unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipFact {
    /// Relationship label (e.g., "VISITED", "LIKES").
    pub relationship: String,
    /// Name of the target entity.
    pub entity: String,
}

impl RelationshipFact {
    pub fn new(relationship: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            relationship: relationship.into(),
            entity: entity.into(),
        }
    }
}
