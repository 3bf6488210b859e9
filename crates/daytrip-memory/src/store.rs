//! Fact store implementation using SQLite.
//!
//! The graph model (one node per user with a `preferences` property,
//! typed outgoing edges to entity nodes) is realized as a three-table
//! relational schema. The contract only ever needs a merge-on-id upsert
//! and a one-hop traversal of a user's outgoing edges, so plain SQL
//! covers it.

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use tracing::{debug, info};

use daytrip_types::{Preferences, RelationshipFact};

use crate::error::{MemoryError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Schema Version
// ─────────────────────────────────────────────────────────────────────────────

/// Current schema version for migrations.
const SCHEMA_VERSION: i32 = 1;

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// A user's durable profile as stored on their graph node.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    /// Unique user identifier.
    pub user_id: String,
    /// Last-write-wins preference set.
    pub preferences: Preferences,
    /// RFC 3339 timestamp of the last profile write, set by the store.
    pub last_updated: String,
}

/// Counts of durable state held by the store.
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub user_count: usize,
    pub entity_count: usize,
    pub fact_count: usize,
    pub history_count: usize,
    pub schema_version: i32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Fact Store
// ─────────────────────────────────────────────────────────────────────────────

/// Durable graph-backed store of user profiles and relationship facts.
///
/// Uses WAL mode for better concurrent read performance. Each public
/// operation executes as one atomic unit; there are no cross-operation
/// transactions. Last-write-wins per profile is the only concurrency
/// control.
pub struct FactStore {
    /// The SQLite connection (wrapped in Mutex for thread safety).
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for FactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactStore").finish_non_exhaustive()
    }
}

impl FactStore {
    /// Open or create a fact store at the given path.
    ///
    /// Creates the database file and initializes the schema if it doesn't
    /// exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|_| {
                    MemoryError::Database(rusqlite::Error::InvalidPath(path.to_path_buf()))
                })?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_FULL_MUTEX,
        )?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;

        info!("Fact store opened at {:?}", path);
        Ok(store)
    }

    /// Create an in-memory store (useful for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;

        info!("In-memory fact store created");
        Ok(store)
    }

    /// Initialize the database with schema and pragmas.
    fn initialize(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        // Enable WAL mode for better concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        self.create_schema(&conn)?;

        Ok(())
    }

    /// Create the database schema.
    fn create_schema(&self, conn: &Connection) -> Result<()> {
        let current_version: i32 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap_or(0);

        if current_version >= SCHEMA_VERSION {
            debug!("Schema up to date (version {})", current_version);
            return Ok(());
        }

        conn.execute_batch(
            r#"
            -- User nodes: one row per user, preferences as a JSON property
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                preferences TEXT NOT NULL,
                last_updated TEXT NOT NULL
            );

            -- Entity nodes: named targets of relationship facts
            CREATE TABLE IF NOT EXISTS entities (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            );

            -- Typed edges from a user to an entity. Duplicate edges of the
            -- same type to the same entity are permitted.
            CREATE TABLE IF NOT EXISTS facts (
                id INTEGER PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                entity_id INTEGER NOT NULL REFERENCES entities(id),
                relationship TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_facts_user_id
                ON facts(user_id);

            -- Durable mirror of the in-session itinerary history
            CREATE TABLE IF NOT EXISTS history (
                user_id TEXT NOT NULL REFERENCES users(id),
                position INTEGER NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, position)
            );
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        info!("Schema created (version {})", SCHEMA_VERSION);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Profile Operations
// ─────────────────────────────────────────────────────────────────────────────

impl FactStore {
    /// Create or replace a user's preferences.
    ///
    /// Idempotent merge-on-id semantics: the profile row is created on
    /// first write and fully replaced afterwards; `last_updated` is
    /// refreshed on every call. All-or-nothing at single-profile
    /// granularity.
    pub fn upsert_profile(&self, user_id: &str, preferences: &Preferences) -> Result<()> {
        if user_id.trim().is_empty() {
            return Err(MemoryError::InvalidData(
                "user_id must not be empty".to_string(),
            ));
        }

        let json = serde_json::to_string(preferences)?;
        let now = Utc::now().to_rfc3339();

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO users (id, preferences, last_updated)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                preferences = excluded.preferences,
                last_updated = excluded.last_updated
            "#,
            params![user_id, json, now],
        )?;

        debug!(user_id = %user_id, "Profile upserted");
        Ok(())
    }

    /// Fetch a user's profile, or `None` if the user has never been
    /// written.
    pub fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let conn = self.conn.lock().unwrap();

        let row = conn
            .query_row(
                "SELECT preferences, last_updated FROM users WHERE id = ?1",
                params![user_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((json, last_updated)) => {
                let preferences: Preferences = serde_json::from_str(&json)?;
                Ok(Some(UserProfile {
                    user_id: user_id.to_string(),
                    preferences,
                    last_updated,
                }))
            }
            None => Ok(None),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Relationship Operations
// ─────────────────────────────────────────────────────────────────────────────

impl FactStore {
    /// Record a typed edge from a user to a named entity.
    ///
    /// Creates the entity node if it doesn't exist. The user must already
    /// have a profile; facts always belong to exactly one user. Duplicate
    /// edges are not deduplicated.
    pub fn add_relationship(&self, user_id: &str, relationship: &str, entity: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();

        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let user_exists: bool = tx
            .query_row(
                "SELECT 1 FROM users WHERE id = ?1",
                params![user_id],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !user_exists {
            return Err(MemoryError::NotFound(format!("user '{}'", user_id)));
        }

        tx.execute(
            "INSERT INTO entities (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            params![entity],
        )?;
        tx.execute(
            r#"
            INSERT INTO facts (user_id, entity_id, relationship, created_at)
            SELECT ?1, id, ?2, ?3 FROM entities WHERE name = ?4
            "#,
            params![user_id, relationship, now, entity],
        )?;

        tx.commit()?;

        debug!(
            user_id = %user_id,
            relationship = %relationship,
            entity = %entity,
            "Relationship fact added"
        );
        Ok(())
    }

    /// Fetch all relationship facts for a user (one hop, outgoing only).
    ///
    /// Returns an empty vec when the user has no recorded relationships or
    /// does not exist. Ordering across calls is unspecified.
    pub fn fetch_relationships(&self, user_id: &str) -> Result<Vec<RelationshipFact>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            r#"
            SELECT f.relationship, e.name
            FROM facts f
            JOIN entities e ON e.id = f.entity_id
            WHERE f.user_id = ?1
            "#,
        )?;

        let facts = stmt
            .query_map(params![user_id], |row| {
                Ok(RelationshipFact {
                    relationship: row.get(0)?,
                    entity: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(facts)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// History Mirror
// ─────────────────────────────────────────────────────────────────────────────

impl FactStore {
    /// Append a generated itinerary to the user's durable history mirror.
    ///
    /// Positions are dense and strictly increasing per user; the append is
    /// one atomic unit.
    pub fn append_history(&self, user_id: &str, content: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();

        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        tx.execute(
            r#"
            INSERT INTO history (user_id, position, content, created_at)
            SELECT ?1, COALESCE(MAX(position) + 1, 0), ?2, ?3
            FROM history WHERE user_id = ?1
            "#,
            params![user_id, content, now],
        )?;

        tx.commit()?;

        debug!(user_id = %user_id, "History entry mirrored");
        Ok(())
    }

    /// Read the durable history mirror for a user, in generation order.
    pub fn fetch_history(&self, user_id: &str) -> Result<Vec<String>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT content FROM history WHERE user_id = ?1 ORDER BY position ASC",
        )?;

        let entries = stmt
            .query_map(params![user_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility Operations
// ─────────────────────────────────────────────────────────────────────────────

impl FactStore {
    /// Get database statistics.
    pub fn stats(&self) -> Result<StoreStats> {
        let conn = self.conn.lock().unwrap();

        let user_count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
        let entity_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM entities", [], |r| r.get(0))?;
        let fact_count: i64 = conn.query_row("SELECT COUNT(*) FROM facts", [], |r| r.get(0))?;
        let history_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM history", [], |r| r.get(0))?;

        Ok(StoreStats {
            user_count: user_count as usize,
            entity_count: entity_count as usize,
            fact_count: fact_count as usize,
            history_count: history_count as usize,
            schema_version: SCHEMA_VERSION,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
