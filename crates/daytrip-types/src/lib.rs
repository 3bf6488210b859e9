//! Shared value objects for the daytrip planner.
//!
//! These types cross crate boundaries: the fact store persists
//! [`Preferences`], the context providers return [`WeatherSnapshot`] and
//! [`NewsDigest`], and the aggregator consumes all of them while planning
//! from a [`TripRequest`].

mod context;
mod error;
mod trip;

pub use context::{NewsArticle, NewsDigest, RelationshipFact, WeatherSnapshot};
pub use error::ValidationError;
pub use trip::{Preferences, TripRequest};
