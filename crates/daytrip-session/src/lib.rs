//! In-process session history.
//!
//! An append-only, per-user log of generated itineraries, ordered by
//! generation time and scoped to the running process. Not durable on its
//! own: durability comes from the fact-store mirror written by the
//! aggregator, never from this crate.

mod history;

pub use history::SessionHistory;
