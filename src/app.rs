//! Shell core for MiniBrowser.
//!
//! Central struct tying the session orchestrator, network monitor,
//! suggestion aggregator, and settings engine together over one event
//! funnel. Engine callbacks land in plain channels; [`BrowserShell::pump`]
//! drains them on the caller's loop, so every shared collection is mutated
//! from a single context.

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::database::connection::Database;
use crate::engine::{EngineEvent, InterceptedRequest};
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::managers::session_orchestrator::{
    is_placeholder_url, resolve_address_input, EngineFactory, SessionOrchestrator,
    SessionOrchestratorTrait, SessionWiring,
};
use crate::services::dark_mode;
use crate::services::network_monitor::{NetworkActivityMonitor, NetworkActivityMonitorTrait};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::suggestion_aggregator::{SuggestionAggregator, SuggestionStore};
use crate::types::bookmark::Bookmark;
use crate::types::errors::{BookmarkError, SessionError, SettingsError};
use crate::types::request::{FinishTarget, HostLookup};
use crate::types::session::{CloseOutcome, SessionId};
use crate::types::suggestion::{RemoteQuery, SearchHit};

/// Local suggestion source backed by the persistent store. Store failures
/// degrade to empty result lists here so a broken database never breaks
/// typing in the address bar.
struct StoreSuggestions<'a> {
    db: &'a Database,
}

impl SuggestionStore for StoreSuggestions<'_> {
    fn bookmark_hits(&self, keyword: &str, limit: usize) -> Vec<SearchHit> {
        let manager = BookmarkManager::new(self.db.connection());
        match manager.search_bookmarks(keyword, limit) {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "bookmark search failed");
                Vec::new()
            }
        }
    }

    fn history_hits(&self, keyword: &str, limit: usize) -> Vec<SearchHit> {
        let manager = HistoryManager::new(self.db.connection());
        match manager.search_history(keyword, limit) {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "history search failed");
                Vec::new()
            }
        }
    }
}

/// Central shell struct holding the orchestrator and all services.
///
/// BookmarkManager and HistoryManager are created on-demand via
/// `db.connection()` because they borrow the connection with a lifetime
/// parameter.
pub struct BrowserShell {
    pub db: Arc<Database>,
    pub orchestrator: SessionOrchestrator,
    pub monitor: NetworkActivityMonitor,
    pub aggregator: SuggestionAggregator,
    pub settings_engine: SettingsEngine,
    engine_events: Receiver<(SessionId, EngineEvent)>,
    intercepted: Receiver<(SessionId, InterceptedRequest)>,
}

impl BrowserShell {
    /// Creates a new shell with platform-default settings storage.
    pub fn new(db_path: &str, engines: EngineFactory) -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_config(db_path, None, engines)
    }

    /// Creates a new shell; `settings_path` overrides where settings are
    /// persisted (tests point this at a temp file).
    ///
    /// Every engine the factory produces is wired with an event sink and a
    /// request interceptor that post into the shell's channels, tagged with
    /// the session id; `pump` routes them from there.
    pub fn with_config(
        db_path: &str,
        settings_path: Option<String>,
        engines: EngineFactory,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(Database::open(db_path)?);

        let (event_tx, event_rx) = channel::<(SessionId, EngineEvent)>();
        let (request_tx, request_rx) = channel::<(SessionId, InterceptedRequest)>();

        let wiring = SessionWiring {
            events: Box::new(move |id| {
                let tx = event_tx.clone();
                Box::new(move |event| {
                    let _ = tx.send((id, event));
                })
            }),
            requests: Box::new(move |id| {
                let tx = request_tx.clone();
                Box::new(move |request| {
                    let _ = tx.send((id, request));
                })
            }),
        };

        let orchestrator = SessionOrchestrator::new(engines, wiring);
        let settings_engine = SettingsEngine::new(settings_path);

        Ok(Self {
            db,
            orchestrator,
            monitor: NetworkActivityMonitor::new(),
            aggregator: SuggestionAggregator::new(),
            settings_engine,
            engine_events: event_rx,
            intercepted: request_rx,
        })
    }

    /// Startup sequence: load persisted settings, falling back to defaults
    /// when the file is unreadable.
    pub fn startup(&mut self) {
        match self.settings_engine.load() {
            Ok(settings) => {
                info!(theme = %settings.theme, dark = settings.web_dark_mode, "settings loaded")
            }
            Err(e) => warn!(error = %e, "settings load failed, using defaults"),
        }
    }

    /// Shutdown sequence: flush settings to disk.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.settings_engine.save() {
            warn!(error = %e, "settings save failed on shutdown");
        }
    }

    /// Drains every queued engine callback: intercepted requests into the
    /// monitor, lifecycle events into the orchestrator. Load completions
    /// additionally close out the page's request record and write history.
    pub fn pump(&mut self) {
        while let Ok((_, request)) = self.intercepted.try_recv() {
            self.monitor.capture_intercepted(request);
        }
        while let Ok((id, event)) = self.engine_events.try_recv() {
            self.dispatch_engine_event(id, event);
        }
    }

    fn dispatch_engine_event(&mut self, id: SessionId, event: EngineEvent) {
        let force_dark = self.settings_engine.get_settings().web_dark_mode;
        let Some(outcome) = self.orchestrator.handle_engine_event(id, event, force_dark) else {
            return;
        };

        if !is_placeholder_url(&outcome.url) {
            let (status, error) = if outcome.ok {
                (Some(200), None)
            } else {
                (Some(500), Some("Load failed"))
            };
            // page size is not exposed at this level, so the main document
            // record completes with size 0
            self.monitor.finish(
                FinishTarget::Url(outcome.url.clone()),
                status,
                HashMap::new(),
                0,
                error,
            );
        }

        if outcome.record_history {
            self.record_history(&outcome.title, &outcome.url);
        }
    }

    fn record_history(&self, title: &str, url: &str) {
        let mut manager = HistoryManager::new(self.db.connection());
        let display = if title.is_empty() { url } else { title };
        if let Err(e) = manager.add_entry(display, url) {
            warn!(error = %e, url, "history write failed");
        }
    }

    /// Resolves address-bar text and either navigates the active session or
    /// opens a first one. Returns false for input that resolves to nothing.
    pub fn open_address(&mut self, text: &str) -> Result<bool, SessionError> {
        let Some(url) = resolve_address_input(text) else {
            return Ok(false);
        };
        if self.orchestrator.is_empty() {
            self.orchestrator.create_session(Some(&url));
        } else {
            self.orchestrator.navigate(&url)?;
        }
        Ok(true)
    }

    pub fn create_session(&mut self, url: Option<&str>) -> SessionId {
        self.orchestrator.create_session(url)
    }

    pub fn close_session(&mut self, id: SessionId) -> Result<CloseOutcome, SessionError> {
        self.orchestrator.close_session(id)
    }

    pub fn switch_session(&mut self, id: SessionId) -> Result<(), SessionError> {
        self.orchestrator.switch_session(id)
    }

    /// Whether the active session's page is bookmarked; drives the address
    /// bar indicator. Placeholder pages and store errors read as false.
    pub fn active_is_bookmarked(&self) -> bool {
        let Some(session) = self.orchestrator.active_session() else {
            return false;
        };
        if is_placeholder_url(&session.url) {
            return false;
        }
        let manager = BookmarkManager::new(self.db.connection());
        match manager.get_bookmark_by_url(&session.url) {
            Ok(found) => found.is_some(),
            Err(e) => {
                warn!(error = %e, "bookmark lookup failed");
                false
            }
        }
    }

    /// Bookmarks the active page, or removes the bookmark if one exists.
    /// Returns whether the page is bookmarked afterwards.
    pub fn toggle_bookmark(&mut self) -> Result<bool, BookmarkError> {
        let Some(session) = self.orchestrator.active_session() else {
            return Ok(false);
        };
        if is_placeholder_url(&session.url) {
            return Ok(false);
        }
        let url = session.url.clone();
        let title = if session.title.is_empty() {
            url.clone()
        } else {
            session.title.clone()
        };

        let mut manager = BookmarkManager::new(self.db.connection());
        if manager.get_bookmark_by_url(&url)?.is_some() {
            manager.delete_bookmark_by_url(&url)?;
            Ok(false)
        } else {
            manager.add_bookmark(&title, &url)?;
            Ok(true)
        }
    }

    pub fn list_bookmarks(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        BookmarkManager::new(self.db.connection()).list_bookmarks()
    }

    /// Feeds one address-bar keystroke into the suggestion aggregator.
    pub fn suggest_input(&mut self, text: &str) {
        let store = StoreSuggestions { db: &self.db };
        self.aggregator.update_input(text, Instant::now(), &store);
    }

    /// The remote query to issue now, if the debounce window has elapsed.
    pub fn due_remote_query(&mut self) -> Option<RemoteQuery> {
        self.aggregator.poll_remote_query(Instant::now())
    }

    /// Merges fetched remote suggestions; stale tokens are dropped inside.
    pub fn apply_remote_suggestions(&mut self, token: u64, hits: Vec<SearchHit>) {
        self.aggregator.apply_remote(token, hits);
    }

    pub fn suggestions(&self) -> &[SearchHit] {
        self.aggregator.suggestions()
    }

    /// Host lookups queued by request capture, for background resolution.
    pub fn take_pending_lookups(&mut self) -> Vec<HostLookup> {
        self.monitor.take_pending_lookups()
    }

    /// Switches the theme; returns false (and changes nothing) for a theme
    /// the shell does not know.
    pub fn set_theme(&mut self, theme: &str) -> Result<bool, SettingsError> {
        self.settings_engine.set_theme(theme)
    }

    /// Persists the forced dark-mode flag and re-applies it to every live
    /// session immediately; later loads pick it up per load finish.
    pub fn set_web_dark_mode(&mut self, enabled: bool) -> Result<(), SettingsError> {
        self.settings_engine.set_web_dark_mode(enabled)?;
        for session in self.orchestrator.sessions_mut() {
            dark_mode::apply(session.engine.as_mut(), enabled);
        }
        Ok(())
    }

    pub fn web_dark_mode(&self) -> bool {
        self.settings_engine.get_settings().web_dark_mode
    }
}
