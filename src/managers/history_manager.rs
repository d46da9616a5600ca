//! History half of the persistent store.
//!
//! Visits append rows; nothing is deduplicated at write time. Reads convert
//! the stored UTC seconds to local time, and search groups rows by URL so a
//! page visited many times suggests once.

use chrono::{DateTime, Local};
use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;
use crate::types::suggestion::SearchHit;

/// Trait defining the history manager interface.
pub trait HistoryManagerTrait {
    fn add_entry(&mut self, title: &str, url: &str) -> Result<i64, HistoryError>;
    fn delete_entry(&mut self, id: i64) -> Result<(), HistoryError>;
    fn clear_history(&mut self) -> Result<(), HistoryError>;
    fn list_history(&self) -> Result<Vec<HistoryEntry>, HistoryError>;
    fn search_history(&self, keyword: &str, limit: usize) -> Result<Vec<SearchHit>, HistoryError>;
}

/// History manager backed by the shared SQLite connection.
pub struct HistoryManager<'a> {
    conn: &'a Connection,
}

impl<'a> HistoryManager<'a> {
    /// Creates a new `HistoryManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn to_local(ts: i64) -> DateTime<Local> {
        DateTime::from_timestamp(ts, 0)
            .unwrap_or(DateTime::UNIX_EPOCH)
            .with_timezone(&Local)
    }

    fn row_to_entry(row: &rusqlite::Row) -> Result<HistoryEntry, rusqlite::Error> {
        let visited_at: i64 = row.get(3)?;
        Ok(HistoryEntry {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            visited_at: Self::to_local(visited_at),
        })
    }
}

impl<'a> HistoryManagerTrait for HistoryManager<'a> {
    /// Records one visit. Returns the new row's ID.
    fn add_entry(&mut self, title: &str, url: &str) -> Result<i64, HistoryError> {
        self.conn
            .execute(
                "INSERT INTO history (title, url, visited_at) VALUES (?1, ?2, ?3)",
                params![title, url, Self::now()],
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Deletes a single entry by ID.
    fn delete_entry(&mut self, id: i64) -> Result<(), HistoryError> {
        let affected = self
            .conn
            .execute("DELETE FROM history WHERE id = ?1", params![id])
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(HistoryError::NotFound(id));
        }
        Ok(())
    }

    /// Removes every history row.
    fn clear_history(&mut self) -> Result<(), HistoryError> {
        self.conn
            .execute("DELETE FROM history", [])
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// Returns all entries newest-first, timestamps converted to local time.
    fn list_history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, title, url, visited_at FROM history
                 ORDER BY visited_at DESC, id DESC",
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_entry)
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))
    }

    /// Substring search grouped by URL, most recent visit first. The title
    /// surfaced for each URL is the one from its latest visit.
    fn search_history(&self, keyword: &str, limit: usize) -> Result<Vec<SearchHit>, HistoryError> {
        let pattern = format!("%{}%", keyword);
        let mut stmt = self
            .conn
            .prepare(
                "SELECT title, url, MAX(visited_at) FROM history
                 WHERE title LIKE ?1 OR url LIKE ?1
                 GROUP BY url
                 ORDER BY MAX(visited_at) DESC
                 LIMIT ?2",
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(params![pattern, limit as i64], |row| {
                Ok(SearchHit {
                    title: row.get(0)?,
                    url: row.get(1)?,
                })
            })
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))
    }
}
