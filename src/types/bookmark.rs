use serde::{Deserialize, Serialize};

/// A saved bookmark. `url` is unique across the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
}
