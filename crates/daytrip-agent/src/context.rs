//! Session context and the merged per-request generation context.

use daytrip_types::{NewsDigest, RelationshipFact, TripRequest, ValidationError, WeatherSnapshot};

/// Identity of the active session, passed explicitly into every planner
/// call.
///
/// Authentication happens in the presentation layer; the core trusts the
/// user id it is handed. Keeping this a value object (rather than ambient
/// state) makes every call's identity auditable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    user_id: String,
}

impl SessionContext {
    /// Create a session context for a user. The id must be non-empty.
    pub fn new(user_id: impl Into<String>) -> Result<Self, ValidationError> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("user_id"));
        }
        Ok(Self { user_id })
    }

    /// The authenticated user's identifier.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// Everything the generation prompt is assembled from.
///
/// Owned by the aggregator for the duration of one request. The trip
/// request is embedded directly from the caller's submission, not re-read
/// from the store: the store write exists for durability and graph
/// population, not for feeding the prompt.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub request: TripRequest,
    pub weather: WeatherSnapshot,
    /// `None` renders as the explicit no-news marker.
    pub news: Option<NewsDigest>,
    /// May be empty; order is whatever the store returned.
    pub facts: Vec<RelationshipFact>,
    /// Prior itineraries in generation order (oldest first).
    pub history: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_context_valid() {
        let ctx = SessionContext::new("romia").unwrap();
        assert_eq!(ctx.user_id(), "romia");
    }

    #[test]
    fn test_session_context_empty_rejected() {
        assert!(SessionContext::new("").is_err());
        assert!(SessionContext::new("   ").is_err());
    }
}
