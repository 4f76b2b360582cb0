//! Local SQLite storage for the quote collection.
//!
//! A single `store` table holds JSON-encoded values under well-known keys:
//! the full quote collection, the last-used category filter, and the sync
//! engine state. Every save is a full serialize-and-overwrite of its slot.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{AppError, Quote, Result, SyncState};

/// Durable slot keys.
const QUOTES_KEY: &str = "quotes";
const LAST_FILTER_KEY: &str = "last_filter";
const SYNC_STATE_KEY: &str = "sync_state";

/// Local storage repository using SQLite.
pub struct LocalStorage {
    conn: Connection,
}

impl LocalStorage {
    /// Opens or creates the local storage database.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or schema creation fails.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create storage directory", e))?;
        }

        let conn = Connection::open(path).map_err(AppError::database)?;

        // Enable WAL mode for better concurrent access
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(AppError::database)?;

        let storage = Self { conn };
        storage.init_schema()?;

        Ok(storage)
    }

    /// Initialize database schema.
    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r"
            CREATE TABLE IF NOT EXISTS store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            ",
            )
            .map_err(AppError::database)?;

        Ok(())
    }

    /// Read the raw JSON text stored under a key.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(AppError::database)
    }

    /// Overwrite the value stored under a key.
    pub fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                r"
            INSERT INTO store (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            ",
                params![key, value],
            )
            .map_err(AppError::database)?;

        Ok(())
    }

    /// Load the persisted quote collection. Returns `None` when the slot has
    /// never been written (callers seed defaults in that case).
    pub fn load_quotes(&self) -> Result<Option<Vec<Quote>>> {
        match self.get_raw(QUOTES_KEY)? {
            Some(json) => {
                let quotes = serde_json::from_str(&json).map_err(AppError::json_parse)?;
                Ok(Some(quotes))
            }
            None => Ok(None),
        }
    }

    /// Persist the full quote collection, overwriting prior contents.
    pub fn save_quotes(&self, quotes: &[Quote]) -> Result<()> {
        let json = serde_json::to_string(quotes).map_err(AppError::json_parse)?;
        self.put_raw(QUOTES_KEY, &json)
    }

    /// Load the last-used category filter.
    pub fn load_last_filter(&self) -> Result<Option<String>> {
        Ok(self.get_raw(LAST_FILTER_KEY)?.filter(|s| !s.is_empty()))
    }

    /// Persist the last-used category filter.
    pub fn save_last_filter(&self, category: &str) -> Result<()> {
        self.put_raw(LAST_FILTER_KEY, category)
    }

    /// Load the persisted sync state.
    pub fn load_sync_state(&self) -> Result<SyncState> {
        match self.get_raw(SYNC_STATE_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(AppError::json_parse),
            None => Ok(SyncState::default()),
        }
    }

    /// Persist the sync state.
    pub fn save_sync_state(&self, state: &SyncState) -> Result<()> {
        let json = serde_json::to_string(state).map_err(AppError::json_parse)?;
        self.put_raw(SYNC_STATE_KEY, &json)
    }

    /// Get total storage size in bytes.
    pub fn storage_size(&self) -> Result<u64> {
        let path = match self.conn.path() {
            Some(p) => Path::new(p),
            None => return Ok(0),
        };
        let metadata = std::fs::metadata(path)
            .map_err(|e| AppError::io("Failed to get storage size", e))?;
        Ok(metadata.len())
    }
}
