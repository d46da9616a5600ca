// MiniBrowser Suggestion Aggregator
// Merges synchronous local search results with a debounced remote lookup.
// Each keystroke publishes local bookmark/history matches immediately and
// (re)arms one debounce timer; when the timer fires the aggregator hands
// out a single remote query carrying a staleness token, and remote results
// are merged in only while that token is still current.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::services::debounce::DebounceTimer;
use crate::types::suggestion::{RemoteQuery, SearchHit};

/// Inputs shorter than this never trigger suggestions, local or remote.
pub const MIN_QUERY_LEN: usize = 2;

/// Delay after the last keystroke before the remote fetch is issued.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// How many hits each local source contributes per query.
pub const LOCAL_LIMIT: usize = 5;

/// Local ranked search consumed by the aggregator. Implementations query
/// the persistent store; failures degrade to empty result lists there.
pub trait SuggestionStore {
    /// Bookmark matches for `keyword`, exact/prefix URL matches first.
    fn bookmark_hits(&self, keyword: &str, limit: usize) -> Vec<SearchHit>;
    /// History matches for `keyword`, grouped by URL, most recent first.
    fn history_hits(&self, keyword: &str, limit: usize) -> Vec<SearchHit>;
}

/// Aggregator state: current input, the published candidate list, and the
/// debounce timer whose generation token guards remote merges.
pub struct SuggestionAggregator {
    timer: DebounceTimer,
    input: String,
    candidates: Vec<SearchHit>,
    changed: bool,
}

impl SuggestionAggregator {
    pub fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            timer: DebounceTimer::new(window),
            input: String::new(),
            candidates: Vec::new(),
            changed: false,
        }
    }

    /// Handles one input change.
    ///
    /// Short input (< [`MIN_QUERY_LEN`] characters) publishes an empty list
    /// and cancels any pending debounce, which also invalidates in-flight
    /// remote fetches. Longer input publishes the local merge immediately
    /// and re-arms the debounce timer for the remote phase.
    pub fn update_input(&mut self, text: &str, now: Instant, store: &dyn SuggestionStore) {
        self.input = text.to_string();

        if text.chars().count() < MIN_QUERY_LEN {
            self.timer.cancel();
            if !self.candidates.is_empty() {
                self.candidates.clear();
                self.changed = true;
            }
            return;
        }

        let mut merged = store.bookmark_hits(text, LOCAL_LIMIT);
        append_deduplicated(&mut merged, store.history_hits(text, LOCAL_LIMIT));
        debug!(input = text, local = merged.len(), "local suggestions published");
        self.candidates = merged;
        self.changed = true;
        self.timer.restart(now);
    }

    /// Polls the debounce timer. When it fires, returns the remote query for
    /// the then-current input, tagged with the staleness token. At most one
    /// query is produced per keystroke burst.
    pub fn poll_remote_query(&mut self, now: Instant) -> Option<RemoteQuery> {
        let token = self.timer.poll_due(now)?;
        Some(RemoteQuery {
            token,
            text: self.input.clone(),
        })
    }

    /// Merges remote results into the published list, append-only and
    /// URL-deduplicated. Results whose token is no longer current (the input
    /// has changed or been cleared since the fetch was issued) are dropped.
    pub fn apply_remote(&mut self, token: u64, hits: Vec<SearchHit>) {
        if !self.timer.is_current(token) {
            debug!(token, "stale remote suggestions discarded");
            return;
        }
        let before = self.candidates.len();
        append_deduplicated(&mut self.candidates, hits);
        if self.candidates.len() != before {
            self.changed = true;
        }
    }

    /// The published candidate list. Local results always precede remote
    /// ones; no later phase reorders earlier entries.
    pub fn suggestions(&self) -> &[SearchHit] {
        &self.candidates
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Next sleep hint for the event loop, if a fetch is still pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// True once per change to the published list since the last call.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Clears all state, cancelling any pending fetch.
    pub fn clear(&mut self) {
        self.timer.cancel();
        self.input.clear();
        if !self.candidates.is_empty() {
            self.candidates.clear();
            self.changed = true;
        }
    }
}

impl Default for SuggestionAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends `extra` onto `list`, skipping entries whose URL is already
/// present. Relative order within both lists is preserved.
fn append_deduplicated(list: &mut Vec<SearchHit>, extra: Vec<SearchHit>) {
    for hit in extra {
        if !list.iter().any(|existing| existing.url == hit.url) {
            list.push(hit);
        }
    }
}
