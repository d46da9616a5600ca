use std::fmt;

// === SessionError ===

/// Errors related to session lifecycle operations.
#[derive(Debug)]
pub enum SessionError {
    /// Session with the given ID was not found.
    NotFound(String),
    /// No session exists to operate on.
    NoActiveSession,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotFound(id) => write!(f, "Session not found: {}", id),
            SessionError::NoActiveSession => write!(f, "No active session"),
        }
    }
}

impl std::error::Error for SessionError {}

// === BookmarkError ===

/// Errors related to bookmark store operations.
#[derive(Debug)]
pub enum BookmarkError {
    /// Bookmark with the given ID or URL was not found.
    NotFound(String),
    /// An update would collide with another bookmark's URL.
    DuplicateUrl(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::NotFound(target) => write!(f, "Bookmark not found: {}", target),
            BookmarkError::DuplicateUrl(url) => write!(f, "Duplicate bookmark URL: {}", url),
            BookmarkError::DatabaseError(msg) => {
                write!(f, "Bookmark database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for BookmarkError {}

// === HistoryError ===

/// Errors related to history store operations.
#[derive(Debug)]
pub enum HistoryError {
    /// History entry with the given ID was not found.
    NotFound(i64),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::NotFound(id) => write!(f, "History entry not found: {}", id),
            HistoryError::DatabaseError(msg) => {
                write!(f, "History database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for HistoryError {}

// === MonitorError ===

/// Errors related to the network activity monitor.
#[derive(Debug)]
pub enum MonitorError {
    /// Serializing the export projection failed.
    ExportFailed(String),
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::ExportFailed(msg) => write!(f, "Request export failed: {}", msg),
        }
    }
}

impl std::error::Error for MonitorError {}

// === SuggestError ===

/// Errors related to the remote suggestion fetch.
#[derive(Debug)]
pub enum SuggestError {
    /// The HTTP request could not be completed.
    Fetch(String),
    /// The response body did not have the expected shape.
    InvalidResponse(String),
}

impl fmt::Display for SuggestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestError::Fetch(msg) => write!(f, "Suggestion fetch failed: {}", msg),
            SuggestError::InvalidResponse(msg) => {
                write!(f, "Invalid suggestion response: {}", msg)
            }
        }
    }
}

impl std::error::Error for SuggestError {}

// === SettingsError ===

/// Errors related to settings persistence.
#[derive(Debug)]
pub enum SettingsError {
    /// Reading or writing the settings file failed.
    IoError(String),
    /// Serializing or deserializing the settings document failed.
    SerializationError(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
