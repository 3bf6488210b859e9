//! Append-only per-user itinerary log.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

/// Session-scoped itinerary history.
///
/// Cloning is cheap and shares the underlying log. Entries are kept in
/// generation order; the log only ever grows for the lifetime of the
/// process.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    entries: Arc<RwLock<HashMap<String, Vec<String>>>>,
}

impl SessionHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a generated itinerary to a user's log.
    pub fn append(&self, user_id: &str, text: impl Into<String>) {
        let mut entries = self.entries.write();
        let log = entries.entry(user_id.to_string()).or_default();
        log.push(text.into());
        trace!(user_id = %user_id, entries = log.len(), "History entry appended");
    }

    /// Read a user's log in generation order. Empty for unknown users.
    pub fn read(&self, user_id: &str) -> Vec<String> {
        self.entries
            .read()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of entries recorded for a user.
    pub fn len(&self, user_id: &str) -> usize {
        self.entries
            .read()
            .get(user_id)
            .map(|log| log.len())
            .unwrap_or(0)
    }

    /// Whether a user has any entries.
    pub fn is_empty(&self, user_id: &str) -> bool {
        self.len(user_id) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_for_unknown_user() {
        let history = SessionHistory::new();
        assert!(history.read("romia").is_empty());
        assert!(history.is_empty("romia"));
    }

    #[test]
    fn test_append_preserves_order() {
        let history = SessionHistory::new();
        history.append("romia", "first");
        history.append("romia", "second");
        history.append("romia", "third");

        assert_eq!(history.read("romia"), vec!["first", "second", "third"]);
        assert_eq!(history.len("romia"), 3);
    }

    #[test]
    fn test_logs_are_per_user() {
        let history = SessionHistory::new();
        history.append("romia", "paris day");
        history.append("dhruv", "delhi day");

        assert_eq!(history.read("romia"), vec!["paris day"]);
        assert_eq!(history.read("dhruv"), vec!["delhi day"]);
    }

    #[test]
    fn test_clones_share_state() {
        let history = SessionHistory::new();
        let other = history.clone();
        history.append("romia", "shared");

        assert_eq!(other.read("romia"), vec!["shared"]);
    }
}
