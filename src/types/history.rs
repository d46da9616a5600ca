use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One recorded page visit. Rows are append-only; repeated visits to the same
/// URL create repeated rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: i64,
    pub title: String,
    pub url: String,
    /// Stored as UTC seconds, surfaced in local time.
    pub visited_at: DateTime<Local>,
}
