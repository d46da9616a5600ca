// MiniBrowser Remote Suggestions
// Fetches completion suggestions from the Google suggest endpoint. The
// "firefox" client format is a JSON array whose second element is the list
// of suggested query strings.

use std::time::Duration;

use tracing::debug;

use crate::types::errors::SuggestError;
use crate::types::suggestion::SearchHit;

pub const SUGGEST_ENDPOINT: &str = "https://suggestqueries.google.com/complete/search";

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the remote suggestion source.
pub struct RemoteSuggestClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RemoteSuggestClient {
    pub fn new() -> Self {
        Self::with_endpoint(SUGGEST_ENDPOINT)
    }

    /// Endpoint override, used by tests to point at a local server.
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    /// Issues one suggestion fetch for `text`.
    ///
    /// Failures are plain errors here; the caller treats them as "no remote
    /// suggestions" rather than surfacing them.
    pub async fn fetch(&self, text: &str) -> Result<Vec<SearchHit>, SuggestError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("client", "firefox"), ("q", text)])
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| SuggestError::Fetch(e.to_string()))?;

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SuggestError::Fetch(e.to_string()))?;

        let hits = parse_suggest_payload(&payload)?;
        debug!(query = text, hits = hits.len(), "remote suggestions fetched");
        Ok(hits)
    }
}

impl Default for RemoteSuggestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses the firefox-client payload `[query, [suggestion, ...], ...]`.
/// Non-string entries in the suggestion array are skipped.
pub fn parse_suggest_payload(payload: &serde_json::Value) -> Result<Vec<SearchHit>, SuggestError> {
    let list = payload
        .get(1)
        .and_then(|v| v.as_array())
        .ok_or_else(|| SuggestError::InvalidResponse("missing suggestion array".to_string()))?;

    Ok(list
        .iter()
        .filter_map(|v| v.as_str())
        .map(search_hit_for)
        .collect())
}

/// A hit pointing at a web search for the suggested phrase.
fn search_hit_for(phrase: &str) -> SearchHit {
    let query: String = url::form_urlencoded::byte_serialize(phrase.as_bytes()).collect();
    SearchHit::new(phrase, &format!("https://www.google.com/search?q={}", query))
}
