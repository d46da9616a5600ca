use serde::{Deserialize, Serialize};

/// One local search hit (bookmark or history row) offered as a suggestion
/// candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// A remote fetch the aggregator wants issued now that the debounce window
/// has closed. `token` must still be current when the response arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteQuery {
    pub token: u64,
    pub text: String,
}
