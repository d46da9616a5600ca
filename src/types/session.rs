use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identity of a tab session. Stable for the session's lifetime,
/// never reused after the session closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle/display state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Allocated; no navigation has started yet.
    Created,
    /// A navigation is in flight.
    Loading,
    /// The last navigation has completed.
    Loaded,
    /// Terminal: the session renders the fixed invalid-target placeholder
    /// and never navigates again.
    ErrorContent,
    /// Terminal: the session has been closed.
    Closed,
}

impl SessionState {
    /// Whether the state machine permits moving from `self` to `next`.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Created, Loading)
                | (Created, ErrorContent)
                | (Created, Closed)
                | (Loading, Loading)
                | (Loading, Loaded)
                | (Loading, Closed)
                | (Loaded, Loading)
                | (Loaded, Closed)
                | (ErrorContent, Closed)
        )
    }

    /// Terminal states accept no further navigation.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::ErrorContent | SessionState::Closed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Created => "created",
            SessionState::Loading => "loading",
            SessionState::Loaded => "loaded",
            SessionState::ErrorContent => "error-content",
            SessionState::Closed => "closed",
        };
        write!(f, "{}", name)
    }
}

/// Shared UI state mirrored from the active session. Owned by the
/// orchestrator; everything else reads it by reference so no copy can drift.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    pub address_text: String,
    pub back_enabled: bool,
    pub forward_enabled: bool,
}

/// Result of closing a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Another session took focus.
    Switched(SessionId),
    /// The last session closed; the window terminates.
    WindowClosed,
}

/// Notices the orchestrator publishes for presentation-side refreshers
/// (suggestion popup, bookmark indicator, tab strip).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionNotice {
    Opened(SessionId),
    Closed(SessionId),
    /// The active session changed; consumers should re-sync against `UiState`.
    Changed(SessionId),
}
