//! Trip request and preference types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A user's stored trip preferences.
///
/// Persisted as a single JSON value on the user's graph node. Writes are
/// last-write-wins: the whole value is replaced on every update, never
/// partially merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// City the tour takes place in.
    pub city: String,
    /// Calendar date of the tour.
    pub date: NaiveDate,
    /// Free-form start time (e.g., "9:00 AM").
    pub timing: String,
    /// Free-form interests (e.g., "culture, food").
    pub interests: String,
    /// Daily budget. Always non-negative.
    pub budget: f64,
    /// Where the day starts (e.g., "Hotel").
    pub start_location: String,
}

/// A single trip planning request.
///
/// Immutable once constructed; one request drives one generation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub city: String,
    pub date: NaiveDate,
    pub timing: String,
    pub interests: String,
    pub budget: f64,
    pub start_location: String,
}

impl TripRequest {
    /// Create a new trip request.
    ///
    /// Returns a validation error if `city` is empty or `budget` is
    /// negative.
    pub fn new(
        city: impl Into<String>,
        date: NaiveDate,
        timing: impl Into<String>,
        interests: impl Into<String>,
        budget: f64,
        start_location: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            city: city.into(),
            date,
            timing: timing.into(),
            interests: interests.into(),
            budget,
            start_location: start_location.into(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Check the request invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.city.trim().is_empty() {
            return Err(ValidationError::EmptyField("city"));
        }
        if self.budget < 0.0 {
            return Err(ValidationError::NegativeBudget(self.budget));
        }
        Ok(())
    }

    /// Convert the request into the preference fields it carries.
    pub fn to_preferences(&self) -> Preferences {
        Preferences {
            city: self.city.clone(),
            date: self.date,
            timing: self.timing.clone(),
            interests: self.interests.clone(),
            budget: self.budget,
            start_location: self.start_location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_valid_request() {
        let request = TripRequest::new(
            "Paris",
            date("2024-06-01"),
            "9:00 AM",
            "culture, food",
            1000.0,
            "Hotel",
        )
        .unwrap();

        assert_eq!(request.city, "Paris");
        assert_eq!(request.budget, 1000.0);
    }

    #[test]
    fn test_empty_city_rejected() {
        let result = TripRequest::new("  ", date("2024-06-01"), "9:00 AM", "", 100.0, "Hotel");
        assert_eq!(result.unwrap_err(), ValidationError::EmptyField("city"));
    }

    #[test]
    fn test_negative_budget_rejected() {
        let result = TripRequest::new("Paris", date("2024-06-01"), "9:00 AM", "", -1.0, "Hotel");
        assert!(matches!(
            result.unwrap_err(),
            ValidationError::NegativeBudget(_)
        ));
    }

    #[test]
    fn test_zero_budget_allowed() {
        let result = TripRequest::new("Paris", date("2024-06-01"), "9:00 AM", "", 0.0, "Hotel");
        assert!(result.is_ok());
    }

    #[test]
    fn test_to_preferences_copies_all_fields() {
        let request = TripRequest::new(
            "Paris",
            date("2024-06-01"),
            "9:00 AM",
            "culture, food",
            1000.0,
            "Hotel",
        )
        .unwrap();

        let prefs = request.to_preferences();
        assert_eq!(prefs.city, request.city);
        assert_eq!(prefs.date, request.date);
        assert_eq!(prefs.timing, request.timing);
        assert_eq!(prefs.interests, request.interests);
        assert_eq!(prefs.budget, request.budget);
        assert_eq!(prefs.start_location, request.start_location);
    }

    #[test]
    fn test_preferences_serde_round_trip() {
        let prefs = Preferences {
            city: "Paris".to_string(),
            date: date("2024-06-01"),
            timing: "9:00 AM".to_string(),
            interests: "culture, food".to_string(),
            budget: 1000.0,
            start_location: "Hotel".to_string(),
        };

        let json = serde_json::to_string(&prefs).unwrap();
        let parsed: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, prefs);
    }
}
