//! Context aggregator for daytrip.
//!
//! The orchestration core: given a session and a trip request, persist the
//! user's preferences in the fact store, gather live context (weather,
//! news) and remembered context (relationship facts, session history),
//! fuse everything into one generation prompt with deterministic
//! structure, and record the generated itinerary.
//!
//! # Flow
//!
//! ```text
//! plan(session, request)
//!   ├─ upsert preferences        (fatal on failure)
//!   ├─ fetch weather ──┐
//!   ├─ fetch news    ──┤  independent reads, weather is the one
//!   ├─ fetch facts   ──┤  hard dependency
//!   ├─ read history  ──┘  (restores the durable mirror on first use)
//!   ├─ assemble prompt (prioritized truncation)
//!   ├─ generate
//!   └─ append to session history + durable mirror
//! ```

pub mod context;
pub mod error;
pub mod planner;
pub mod prompt;

pub use context::{GenerationContext, SessionContext};
pub use error::{PlanError, Result};
pub use planner::{Planner, PlannerConfig};
pub use prompt::{NO_HISTORY_MARKER, NO_NEWS_MARKER, PromptBuilder};
