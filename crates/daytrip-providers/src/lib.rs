//! Best-effort external context providers for daytrip.
//!
//! Two independent read-only lookups enrich an itinerary prompt: current
//! weather by city and recent news by city and date. Both follow the same
//! contract: one HTTP attempt per fetch, and any failure (timeout,
//! transport error, non-success status, malformed body) yields Absent
//! rather than an error. Whether absence is tolerable is the caller's
//! decision, not the provider's.

pub mod error;
mod news;
mod source;
mod weather;

pub use error::{ProviderError, Result};
pub use news::{NewsConfig, NewsProvider};
pub use source::{NewsSource, WeatherSource};
pub use weather::{WeatherConfig, WeatherProvider};

#[cfg(any(test, feature = "testing"))]
pub use source::{MockNews, MockWeather};
