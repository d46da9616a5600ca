//! Unit tests for database initialization and schema migrations.
//!
//! These tests verify that opening a database creates the bookmarks and
//! history tables, records the schema version, and that migrations are
//! idempotent across repeated opens of the same file.

use tempfile::TempDir;

use minibrowser::database::{migrations, Database};

/// Helper: true if a table with the given name exists.
fn table_exists(db: &Database, name: &str) -> bool {
    db.connection()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
        > 0
}

/// Helper: true if an index with the given name exists.
fn index_exists(db: &Database, name: &str) -> bool {
    db.connection()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = ?1",
            [name],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
        > 0
}

// ---------------------------------------------------------------------------
// Schema creation
// ---------------------------------------------------------------------------

/// Opening an in-memory database creates all application tables.
#[test]
fn test_open_creates_tables() {
    let db = Database::open_in_memory().unwrap();

    assert!(table_exists(&db, "bookmarks"), "bookmarks table missing");
    assert!(table_exists(&db, "history"), "history table missing");
    assert!(
        table_exists(&db, "schema_version"),
        "schema_version table missing"
    );
}

/// The history table gets its lookup indices for URL and visit time.
#[test]
fn test_history_indices_created() {
    let db = Database::open_in_memory().unwrap();

    assert!(index_exists(&db, "idx_history_url"));
    assert!(index_exists(&db, "idx_history_visited_at"));
}

/// The recorded schema version matches the current migration level.
#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().unwrap();

    assert_eq!(
        migrations::get_schema_version(db.connection()),
        migrations::CURRENT_SCHEMA_VERSION
    );
}

/// The bookmarks table enforces URL uniqueness at the schema level.
#[test]
fn test_bookmark_url_unique_constraint() {
    let db = Database::open_in_memory().unwrap();
    let conn = db.connection();

    conn.execute(
        "INSERT INTO bookmarks (title, url) VALUES ('A', 'https://example.com')",
        [],
    )
    .unwrap();
    let dup = conn.execute(
        "INSERT INTO bookmarks (title, url) VALUES ('B', 'https://example.com')",
        [],
    );
    assert!(dup.is_err(), "duplicate URL insert should violate UNIQUE");
}

// ---------------------------------------------------------------------------
// Idempotence and persistence
// ---------------------------------------------------------------------------

/// Running migrations again on an up-to-date database is a no-op.
#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().unwrap();

    migrations::run_all(db.connection()).unwrap();
    migrations::run_all(db.connection()).unwrap();

    assert_eq!(
        migrations::get_schema_version(db.connection()),
        migrations::CURRENT_SCHEMA_VERSION
    );

    // Exactly one row per applied version, no duplicates from re-runs.
    let versions: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(versions, migrations::CURRENT_SCHEMA_VERSION as i64);
}

/// Data written through one Database handle survives reopening the file.
#[test]
fn test_file_database_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("browser.db");
    let path_str = path.to_string_lossy().to_string();

    {
        let db = Database::open(&path_str).unwrap();
        db.connection()
            .execute(
                "INSERT INTO bookmarks (title, url) VALUES ('Rust', 'https://rust-lang.org')",
                [],
            )
            .unwrap();
    }

    let db = Database::open(&path_str).unwrap();
    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1, "bookmark should survive reopen");
    assert_eq!(
        migrations::get_schema_version(db.connection()),
        migrations::CURRENT_SCHEMA_VERSION
    );
}

/// A fresh connection reports version 0 before any migration runs.
#[test]
fn test_unmigrated_connection_reports_version_zero() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    assert_eq!(migrations::get_schema_version(&conn), 0);
}

/// The default store location is the platform data directory.
#[test]
fn test_default_path_is_under_data_dir() {
    let path = Database::default_path();
    assert!(path.ends_with("minibrowser.db"));
    assert!(path
        .to_string_lossy()
        .to_lowercase()
        .contains("minibrowser"));
}
