//! Fact store for daytrip.
//!
//! Durable, graph-shaped storage of user profiles and relationship facts
//! backed by SQLite. One node per user carries a `preferences` JSON
//! property and a `last_updated` timestamp; typed outgoing edges connect
//! users to named entities ("VISITED", "LIKES", ...). The store also
//! holds the durable mirror of the per-session itinerary history.
//!
//! # Usage
//!
//! ```no_run
//! use daytrip_memory::FactStore;
//! use daytrip_types::Preferences;
//!
//! let store = FactStore::open("~/.daytrip/facts.db")?;
//! # let preferences: Preferences = todo!();
//! store.upsert_profile("romia", &preferences)?;
//! let facts = store.fetch_relationships("romia")?;
//! # Ok::<(), daytrip_memory::MemoryError>(())
//! ```

pub mod error;
pub mod store;

pub use error::{MemoryError, Result};
pub use store::{FactStore, StoreStats, UserProfile};
