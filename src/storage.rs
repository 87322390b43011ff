//! `SQLite`-backed persistence gateway.
//!
//! All collections are stored as JSON blobs in one key-value table in
//! `<data dir>/storage.sqlite3`.

use crate::error::{Error, Result};
use crate::paths;
use crate::traits::KeyValueStore;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// Storage key constants for consistent usage across the codebase.
pub mod keys {
    /// Task collection.
    pub const TASKS: &str = "productivity-tasks";
    /// Note collection.
    pub const NOTES: &str = "productivity-notes";
    /// Project collection.
    pub const PROJECTS: &str = "productivity-projects";
    /// Saved script collection.
    pub const SCRIPTS: &str = "productivity-scripts";
    /// Shared UI settings (theme, font size).
    pub const SETTINGS: &str = "productivity-settings";
    /// Scratch buffer for the script in progress.
    pub const CURRENT_SCRIPT: &str = "productivity-current-script";
    /// Personal info profile.
    pub const PERSONAL_INFO: &str = "personal-info";
    /// Number of script runs so far.
    pub const EXECUTION_COUNT: &str = "script-execution-count";
}

/// SQLite-based key-value store.
///
/// Each operation opens a new connection to the database file. This is
/// acceptable for the low frequency of user-driven writes.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    /// Path to the database file.
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open the store at the default location in the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be determined or the
    /// database cannot be initialized.
    pub fn open_default() -> Result<Self> {
        let db_path = paths::database_path()
            .ok_or_else(|| Error::Storage("cannot determine data directory".to_string()))?;
        Self::with_path(db_path)
    }

    /// Open the store with a specific database path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn with_path(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = Self { db_path: db_path.as_ref().to_path_buf() };
        store.init_schema()?;
        Ok(store)
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Ok(conn)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            ",
        )?;

        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.open()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        log::debug!("event=kv_set module=storage key={key} bytes={}", value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.open()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        log::debug!("event=kv_remove module=storage key={key}");
        Ok(())
    }
}
