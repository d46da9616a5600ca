//! SQLite connection management for the MiniBrowser store.
//!
//! Provides the [`Database`] struct that wraps a `rusqlite::Connection`
//! and runs schema migrations on open.

use rusqlite::Connection;
use std::path::{Path, PathBuf};

use super::migrations;
use crate::platform;

/// Wrapper owning the SQLite connection behind bookmarks and history.
///
/// Opening runs all pending migrations, so a `Database` is always at the
/// current schema version.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Where the store lives by default: `minibrowser.db` under the platform
    /// data directory.
    pub fn default_path() -> PathBuf {
        platform::get_data_dir().join("minibrowser.db")
    }

    /// Opens (or creates) the store at the given file path.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the connection cannot be established or a
    /// migration fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.run_migrations()?;
        Ok(db)
    }

    /// Opens an in-memory store, discarded on drop. Used by tests and the
    /// demo binary.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the connection cannot be established or a
    /// migration fails.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> Result<(), rusqlite::Error> {
        migrations::run_all(&self.conn)
    }

    /// Returns the underlying connection for managers to query against.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
