//! Bookmark half of the persistent store.
//!
//! Bookmarks are keyed by integer rowid and carry a unique URL; adding an
//! already-bookmarked URL reports "not added" instead of failing. Search is
//! ranked so URL matches come before title-only matches, which feeds the
//! suggestion aggregator's local phase.

use rusqlite::{params, Connection, ErrorCode};

use crate::types::bookmark::Bookmark;
use crate::types::errors::BookmarkError;
use crate::types::suggestion::SearchHit;

/// Trait defining the bookmark manager interface.
pub trait BookmarkManagerTrait {
    fn add_bookmark(&mut self, title: &str, url: &str) -> Result<bool, BookmarkError>;
    fn delete_bookmark(&mut self, id: i64) -> Result<(), BookmarkError>;
    fn delete_bookmark_by_url(&mut self, url: &str) -> Result<(), BookmarkError>;
    fn update_bookmark(&mut self, id: i64, title: &str, url: &str) -> Result<(), BookmarkError>;
    fn get_bookmark_by_url(&self, url: &str) -> Result<Option<Bookmark>, BookmarkError>;
    fn list_bookmarks(&self) -> Result<Vec<Bookmark>, BookmarkError>;
    fn search_bookmarks(&self, keyword: &str, limit: usize) -> Result<Vec<SearchHit>, BookmarkError>;
}

/// Bookmark manager backed by the shared SQLite connection.
pub struct BookmarkManager<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkManager<'a> {
    /// Creates a new `BookmarkManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn row_to_bookmark(row: &rusqlite::Row) -> Result<Bookmark, rusqlite::Error> {
        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
        })
    }

    fn row_to_hit(row: &rusqlite::Row) -> Result<SearchHit, rusqlite::Error> {
        Ok(SearchHit {
            title: row.get(0)?,
            url: row.get(1)?,
        })
    }
}

impl<'a> BookmarkManagerTrait for BookmarkManager<'a> {
    /// Adds a bookmark. Returns `false` (without touching the store) when the
    /// URL is already bookmarked.
    fn add_bookmark(&mut self, title: &str, url: &str) -> Result<bool, BookmarkError> {
        let inserted = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO bookmarks (title, url) VALUES (?1, ?2)",
                params![title, url],
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        Ok(inserted > 0)
    }

    /// Removes a bookmark by ID.
    fn delete_bookmark(&mut self, id: i64) -> Result<(), BookmarkError> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id])
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(BookmarkError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Removes a bookmark by URL.
    fn delete_bookmark_by_url(&mut self, url: &str) -> Result<(), BookmarkError> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE url = ?1", params![url])
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(BookmarkError::NotFound(url.to_string()));
        }
        Ok(())
    }

    /// Rewrites an existing bookmark's title and URL in place.
    fn update_bookmark(&mut self, id: i64, title: &str, url: &str) -> Result<(), BookmarkError> {
        let result = self.conn.execute(
            "UPDATE bookmarks SET title = ?1, url = ?2 WHERE id = ?3",
            params![title, url, id],
        );

        match result {
            Ok(0) => Err(BookmarkError::NotFound(id.to_string())),
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(BookmarkError::DuplicateUrl(url.to_string()))
            }
            Err(e) => Err(BookmarkError::DatabaseError(e.to_string())),
        }
    }

    /// Looks a bookmark up by its exact URL. Drives the bookmark indicator.
    fn get_bookmark_by_url(&self, url: &str) -> Result<Option<Bookmark>, BookmarkError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, url FROM bookmarks WHERE url = ?1")
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let mut rows = stmt
            .query_map(params![url], Self::row_to_bookmark)
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        match rows.next() {
            Some(row) => Ok(Some(
                row.map_err(|e| BookmarkError::DatabaseError(e.to_string()))?,
            )),
            None => Ok(None),
        }
    }

    /// Returns all bookmarks, newest first.
    fn list_bookmarks(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, url FROM bookmarks ORDER BY id DESC")
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_bookmark)
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))
    }

    /// Substring search over title and URL, URL matches ranked first.
    fn search_bookmarks(&self, keyword: &str, limit: usize) -> Result<Vec<SearchHit>, BookmarkError> {
        let pattern = format!("%{}%", keyword);
        let mut stmt = self
            .conn
            .prepare(
                "SELECT title, url FROM bookmarks
                 WHERE title LIKE ?1 OR url LIKE ?1
                 ORDER BY CASE WHEN url LIKE ?1 THEN 0 ELSE 1 END, id DESC
                 LIMIT ?2",
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(params![pattern, limit as i64], Self::row_to_hit)
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))
    }
}
