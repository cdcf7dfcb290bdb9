//! SQLite connection and schema

use crate::error::Result;
use rusqlite::{Connection, Transaction};
use std::fs;
use std::path::Path;
use tracing::debug;

const SCHEMA_VERSION: i64 = 1;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS notes (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS text_items (
    id TEXT PRIMARY KEY,
    note_id TEXT NOT NULL REFERENCES notes (id) ON DELETE CASCADE,
    created_at INTEGER NOT NULL,
    content TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS image_items (
    id TEXT PRIMARY KEY,
    note_id TEXT NOT NULL REFERENCES notes (id) ON DELETE CASCADE,
    created_at INTEGER NOT NULL,
    link TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS audio_items (
    id TEXT PRIMARY KEY,
    note_id TEXT NOT NULL REFERENCES notes (id) ON DELETE CASCADE,
    created_at INTEGER NOT NULL,
    link TEXT NOT NULL,
    duration_secs INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_text_items_note ON text_items (note_id);
CREATE INDEX IF NOT EXISTS idx_image_items_note ON image_items (note_id);
CREATE INDEX IF NOT EXISTS idx_audio_items_note ON audio_items (note_id);
"#;

/// Database wrapper owning the SQLite connection
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        debug!(path = %path.display(), "opening database");
        Self::init(Connection::open(path)?)
    }

    /// Create an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        // Cascades only fire with foreign keys on, and the pragma is per connection
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version < SCHEMA_VERSION {
            debug!(from = version, to = SCHEMA_VERSION, "migrating schema");
            self.conn.execute_batch(SCHEMA)?;
            self.conn
                .execute_batch(&format!("PRAGMA user_version = {};", SCHEMA_VERSION))?;
        }

        Ok(())
    }

    pub fn schema_version(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Start a transaction; dropping it without commit rolls back
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }
}
