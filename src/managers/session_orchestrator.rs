//! Session lifecycle orchestration.
//!
//! Owns the ordered collection of tab sessions, keeps exactly one of them
//! active, and mirrors the active session into the shared [`UiState`]. Engine
//! events are routed in by session id; events for ids that no longer exist
//! are dropped, which is what makes closing a session safe against late
//! callbacks.

use tracing::{debug, info};
use url::Url;

use crate::engine::{EngineEvent, EventSink, RenderEngine, RequestInterceptor};
use crate::services::dark_mode;
use crate::types::errors::SessionError;
use crate::types::session::{CloseOutcome, SessionId, SessionNotice, SessionState, UiState};

/// Fixed placeholder rendered when a session is created without a usable
/// target.
pub const INVALID_URL_CONTENT: &str = "<html><body style=\"font-family: sans-serif;\">\
<h1>Invalid URL</h1><p>The requested address could not be opened.</p></body></html>";

/// Placeholder rendered when a navigation fails.
pub const LOAD_FAILED_CONTENT: &str = "<html><body style=\"font-family: sans-serif;\">\
<h1>Page not found</h1><p>The page could not be loaded.</p></body></html>";

/// Tab labels are the session title cut to this many characters.
pub const SESSION_LABEL_MAX: usize = 15;

const DEFAULT_LABEL: &str = "New Tab";

/// URLs that never produce history entries or request completions.
pub(crate) fn is_placeholder_url(url: &str) -> bool {
    url.is_empty() || url == "about:blank"
}

/// Allocates one engine per created session.
pub type EngineFactory = Box<dyn FnMut() -> Box<dyn RenderEngine> + Send>;

/// Per-session wiring installed on every new engine: an event sink and a
/// request interceptor, both keyed by the session's id so the receiving end
/// can route (and drop late deliveries after close).
pub struct SessionWiring {
    pub events: Box<dyn Fn(SessionId) -> EventSink + Send>,
    pub requests: Box<dyn Fn(SessionId) -> RequestInterceptor + Send>,
}

/// One browsing tab: an engine instance plus cached display fields.
pub struct TabSession {
    pub id: SessionId,
    pub engine: Box<dyn RenderEngine>,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    pub state: SessionState,
}

impl TabSession {
    /// Tab-strip label: the title cut to [`SESSION_LABEL_MAX`] characters,
    /// `"New Tab"` until a title event arrives.
    pub fn label(&self) -> String {
        if self.title.is_empty() {
            return DEFAULT_LABEL.to_string();
        }
        self.title.chars().take(SESSION_LABEL_MAX).collect()
    }

    fn transition(&mut self, next: SessionState) {
        if self.state == next {
            return;
        }
        if self.state.can_transition_to(next) {
            debug!(session = %self.id, from = %self.state, to = %next, "session state");
            self.state = next;
        } else {
            debug!(session = %self.id, from = %self.state, to = %next, "transition refused");
        }
    }
}

/// What a `LoadFinished` event amounted to, for the shell to act on:
/// history recording and completion of the page's request record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub ok: bool,
    pub url: String,
    pub title: String,
    /// True only for successful loads of real URLs in sessions that can
    /// still navigate.
    pub record_history: bool,
}

/// Trait defining the session orchestrator interface.
pub trait SessionOrchestratorTrait {
    fn create_session(&mut self, url: Option<&str>) -> SessionId;
    fn close_session(&mut self, id: SessionId) -> Result<CloseOutcome, SessionError>;
    fn switch_session(&mut self, id: SessionId) -> Result<(), SessionError>;
    fn next_session(&mut self);
    fn previous_session(&mut self);
    fn navigate(&mut self, url: &str) -> Result<(), SessionError>;
    fn reload(&mut self) -> Result<(), SessionError>;
    fn go_back(&mut self) -> Result<(), SessionError>;
    fn go_forward(&mut self) -> Result<(), SessionError>;
    fn handle_engine_event(
        &mut self,
        id: SessionId,
        event: EngineEvent,
        force_dark: bool,
    ) -> Option<LoadOutcome>;
}

/// Orchestrator owning the session collection and the shared UI state.
pub struct SessionOrchestrator {
    engines: EngineFactory,
    wiring: SessionWiring,
    sessions: Vec<TabSession>,
    /// Index into `sessions`; meaningful only while the collection is
    /// non-empty.
    active: usize,
    ui: UiState,
    notices: Vec<SessionNotice>,
}

impl SessionOrchestrator {
    pub fn new(engines: EngineFactory, wiring: SessionWiring) -> Self {
        Self {
            engines,
            wiring,
            sessions: Vec::new(),
            active: 0,
            ui: UiState::default(),
            notices: Vec::new(),
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn sessions(&self) -> &[TabSession] {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut [TabSession] {
        &mut self.sessions
    }

    pub fn session(&self, id: SessionId) -> Option<&TabSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn active_index(&self) -> Option<usize> {
        if self.sessions.is_empty() {
            None
        } else {
            Some(self.active)
        }
    }

    pub fn active_session(&self) -> Option<&TabSession> {
        self.sessions.get(self.active)
    }

    /// The shared UI state mirrored from the active session. Single owned
    /// copy; read it by reference wherever current-session context is needed.
    pub fn ui_state(&self) -> &UiState {
        &self.ui
    }

    /// Tab-strip labels in session order.
    pub fn labels(&self) -> Vec<String> {
        self.sessions.iter().map(TabSession::label).collect()
    }

    /// Drains notices accumulated since the last call.
    pub fn take_notices(&mut self) -> Vec<SessionNotice> {
        std::mem::take(&mut self.notices)
    }

    fn index_of(&self, id: SessionId) -> Option<usize> {
        self.sessions.iter().position(|s| s.id == id)
    }

    fn sync_ui(&mut self) {
        if let Some(session) = self.sessions.get(self.active) {
            self.ui.address_text = session.url.clone();
            self.ui.back_enabled = session.engine.can_go_back();
            self.ui.forward_enabled = session.engine.can_go_forward();
        }
    }

    fn activate_index(&mut self, idx: usize) {
        self.active = idx;
        self.sync_ui();
        let id = self.sessions[idx].id;
        self.notices.push(SessionNotice::Changed(id));
        debug!(session = %id, index = idx, "session activated");
    }

    fn valid_target(url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => !parsed.scheme().is_empty(),
            Err(_) => false,
        }
    }
}

impl SessionOrchestratorTrait for SessionOrchestrator {
    /// Creates a session, wires its engine, and makes it active.
    ///
    /// A missing or invalid target (no parseable scheme) puts the session in
    /// the terminal error-content state with a fixed placeholder; this is not
    /// a failure of the operation itself.
    fn create_session(&mut self, url: Option<&str>) -> SessionId {
        let id = SessionId::new();
        let mut engine = (self.engines)();
        engine.subscribe((self.wiring.events)(id));
        engine.set_request_interceptor((self.wiring.requests)(id));

        let mut session = TabSession {
            id,
            engine,
            title: String::new(),
            url: String::new(),
            icon: None,
            state: SessionState::Created,
        };

        match url.filter(|u| Self::valid_target(u)) {
            Some(target) => {
                session.url = target.to_string();
                session.transition(SessionState::Loading);
                session.engine.navigate(target);
                info!(session = %id, url = target, "session created");
            }
            None => {
                session.transition(SessionState::ErrorContent);
                session.engine.set_content(INVALID_URL_CONTENT);
                info!(session = %id, "session created in error-content state");
            }
        }

        self.sessions.push(session);
        self.notices.push(SessionNotice::Opened(id));
        self.activate_index(self.sessions.len() - 1);
        id
    }

    /// Closes a session. Closing the last one reports `WindowClosed` — the
    /// shell convention, not an error. Otherwise the session occupying the
    /// vacated position's predecessor index (clamped) becomes active.
    fn close_session(&mut self, id: SessionId) -> Result<CloseOutcome, SessionError> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        let mut session = self.sessions.remove(idx);
        // unsubscribe before the engine is released so no event delivered
        // after this point can reach freed session state
        session.engine.unsubscribe();
        session.engine.clear_request_interceptor();
        session.transition(SessionState::Closed);
        self.notices.push(SessionNotice::Closed(id));
        info!(session = %id, "session closed");

        if self.sessions.is_empty() {
            self.ui = UiState::default();
            return Ok(CloseOutcome::WindowClosed);
        }

        let new_idx = idx.saturating_sub(1).min(self.sessions.len() - 1);
        self.activate_index(new_idx);
        Ok(CloseOutcome::Switched(self.sessions[new_idx].id))
    }

    /// Makes `id` active and syncs the shared UI state.
    fn switch_session(&mut self, id: SessionId) -> Result<(), SessionError> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        self.activate_index(idx);
        Ok(())
    }

    /// Cyclic rotation forward; no-op with fewer than two sessions.
    fn next_session(&mut self) {
        if self.sessions.len() < 2 {
            return;
        }
        let idx = (self.active + 1) % self.sessions.len();
        self.activate_index(idx);
    }

    /// Cyclic rotation backward; no-op with fewer than two sessions.
    fn previous_session(&mut self) {
        if self.sessions.len() < 2 {
            return;
        }
        let idx = (self.active + self.sessions.len() - 1) % self.sessions.len();
        self.activate_index(idx);
    }

    /// Navigates the active session. Ignored in terminal states.
    fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        if self.sessions.is_empty() {
            return Err(SessionError::NoActiveSession);
        }
        {
            let session = &mut self.sessions[self.active];
            if session.state.is_terminal() {
                debug!(session = %session.id, "navigation ignored in terminal state");
                return Ok(());
            }
            session.url = url.to_string();
            session.transition(SessionState::Loading);
            session.engine.navigate(url);
        }
        self.sync_ui();
        Ok(())
    }

    fn reload(&mut self) -> Result<(), SessionError> {
        if self.sessions.is_empty() {
            return Err(SessionError::NoActiveSession);
        }
        {
            let session = &mut self.sessions[self.active];
            if session.state.is_terminal() {
                return Ok(());
            }
            session.transition(SessionState::Loading);
            session.engine.reload();
        }
        self.sync_ui();
        Ok(())
    }

    fn go_back(&mut self) -> Result<(), SessionError> {
        if self.sessions.is_empty() {
            return Err(SessionError::NoActiveSession);
        }
        {
            let session = &mut self.sessions[self.active];
            if session.state.is_terminal() {
                return Ok(());
            }
            session.engine.go_back();
        }
        self.sync_ui();
        Ok(())
    }

    fn go_forward(&mut self) -> Result<(), SessionError> {
        if self.sessions.is_empty() {
            return Err(SessionError::NoActiveSession);
        }
        {
            let session = &mut self.sessions[self.active];
            if session.state.is_terminal() {
                return Ok(());
            }
            session.engine.go_forward();
        }
        self.sync_ui();
        Ok(())
    }

    /// Routes one engine event to its session. Events for unknown ids (a
    /// session closed while the event was in flight) are dropped.
    ///
    /// `force_dark` is passed by the caller per event rather than read from
    /// any ambient flag, so the injection path is testable in isolation.
    fn handle_engine_event(
        &mut self,
        id: SessionId,
        event: EngineEvent,
        force_dark: bool,
    ) -> Option<LoadOutcome> {
        let Some(idx) = self.index_of(id) else {
            debug!(session = %id, "event for unknown session dropped");
            return None;
        };

        match event {
            EngineEvent::UrlChanged(url) => {
                {
                    let session = &mut self.sessions[idx];
                    session.url = url;
                    session.transition(SessionState::Loading);
                }
                if idx == self.active {
                    self.sync_ui();
                }
                None
            }
            EngineEvent::TitleChanged(title) => {
                self.sessions[idx].title = title;
                None
            }
            EngineEvent::IconChanged(icon) => {
                self.sessions[idx].icon = icon;
                None
            }
            EngineEvent::LoadFinished { ok } => {
                let outcome = {
                    let session = &mut self.sessions[idx];
                    session.transition(SessionState::Loaded);
                    if !ok {
                        session.engine.set_content(LOAD_FAILED_CONTENT);
                    }
                    dark_mode::apply(session.engine.as_mut(), force_dark);
                    let record_history = ok
                        && !is_placeholder_url(&session.url)
                        && session.state != SessionState::ErrorContent;
                    LoadOutcome {
                        ok,
                        url: session.url.clone(),
                        title: session.title.clone(),
                        record_history,
                    }
                };
                if idx == self.active {
                    self.sync_ui();
                }
                Some(outcome)
            }
        }
    }
}

/// Resolves free text typed into the address bar: pass-through for anything
/// with a scheme, `https://` for host-looking text, a web search otherwise.
/// Empty input resolves to nothing.
pub fn resolve_address_input(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains("://") {
        return Some(trimmed.to_string());
    }
    if trimmed.contains('.') && !trimmed.contains(' ') {
        return Some(format!("https://{}", trimmed));
    }
    let query: String = url::form_urlencoded::byte_serialize(trimmed.as_bytes()).collect();
    Some(format!("https://www.google.com/search?q={}", query))
}
