//! Unit tests for the SessionOrchestrator and the shell-level session flows.
//!
//! These tests exercise session creation and wiring, the close adjacency
//! rule, cyclic switching, navigation command forwarding, engine event
//! routing (including events arriving after close), and the shell's
//! history/monitor side effects on load completion.
//!
//! A ProbeEngine test double records every command the orchestrator issues
//! and exposes the installed event sink so tests can emit events exactly
//! like a real engine would.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use minibrowser::app::BrowserShell;
use minibrowser::engine::{
    EngineEvent, EventSink, InterceptedRequest, RenderEngine, RequestInterceptor,
};
use minibrowser::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use minibrowser::managers::session_orchestrator::{
    EngineFactory, SessionOrchestrator, SessionOrchestratorTrait, SessionWiring,
    INVALID_URL_CONTENT, LOAD_FAILED_CONTENT,
};
use minibrowser::services::network_monitor::NetworkActivityMonitorTrait;
use minibrowser::types::errors::SessionError;
use minibrowser::types::session::{CloseOutcome, SessionNotice, SessionState};

// ---------------------------------------------------------------------------
// ProbeEngine test double
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ProbeState {
    url: String,
    /// Ordered log of engine commands received.
    calls: Vec<String>,
    /// Payloads passed to set_content.
    contents: Vec<String>,
    /// Payloads passed to run_script.
    scripts: Vec<String>,
    can_back: bool,
    can_forward: bool,
    subscribed: bool,
    sink: Option<EventSink>,
    interceptor: Option<RequestInterceptor>,
}

type ProbeHandle = Arc<Mutex<ProbeState>>;

/// Engine double whose state is shared with the test through an Arc, so the
/// test can inspect commands and drive events after the engine has been
/// boxed away inside the orchestrator.
struct ProbeEngine {
    state: ProbeHandle,
}

impl RenderEngine for ProbeEngine {
    fn navigate(&mut self, url: &str) {
        let mut s = self.state.lock().unwrap();
        s.url = url.to_string();
        s.calls.push(format!("navigate {}", url));
    }

    fn set_content(&mut self, html: &str) {
        let mut s = self.state.lock().unwrap();
        s.url = "about:blank".to_string();
        s.contents.push(html.to_string());
        s.calls.push("set_content".to_string());
    }

    fn reload(&mut self) {
        self.state.lock().unwrap().calls.push("reload".to_string());
    }

    fn go_back(&mut self) {
        self.state.lock().unwrap().calls.push("go_back".to_string());
    }

    fn go_forward(&mut self) {
        self.state.lock().unwrap().calls.push("go_forward".to_string());
    }

    fn can_go_back(&self) -> bool {
        self.state.lock().unwrap().can_back
    }

    fn can_go_forward(&self) -> bool {
        self.state.lock().unwrap().can_forward
    }

    fn current_url(&self) -> String {
        self.state.lock().unwrap().url.clone()
    }

    fn title(&self) -> String {
        String::new()
    }

    fn run_script(&mut self, script: &str) {
        self.state.lock().unwrap().scripts.push(script.to_string());
    }

    fn subscribe(&mut self, sink: EventSink) {
        let mut s = self.state.lock().unwrap();
        s.subscribed = true;
        s.sink = Some(sink);
        s.calls.push("subscribe".to_string());
    }

    fn unsubscribe(&mut self) {
        let mut s = self.state.lock().unwrap();
        s.subscribed = false;
        s.sink = None;
        s.calls.push("unsubscribe".to_string());
    }

    fn set_request_interceptor(&mut self, interceptor: RequestInterceptor) {
        let mut s = self.state.lock().unwrap();
        s.interceptor = Some(interceptor);
        s.calls.push("set_interceptor".to_string());
    }

    fn clear_request_interceptor(&mut self) {
        let mut s = self.state.lock().unwrap();
        s.interceptor = None;
        s.calls.push("clear_interceptor".to_string());
    }
}

/// Factory producing probe engines; every created probe's state handle is
/// appended to the returned registry in creation order.
fn probe_factory() -> (EngineFactory, Arc<Mutex<Vec<ProbeHandle>>>) {
    let registry: Arc<Mutex<Vec<ProbeHandle>>> = Arc::new(Mutex::new(Vec::new()));
    let inner = Arc::clone(&registry);
    let factory: EngineFactory = Box::new(move || {
        let state: ProbeHandle = Arc::new(Mutex::new(ProbeState::default()));
        inner.lock().unwrap().push(Arc::clone(&state));
        Box::new(ProbeEngine { state })
    });
    (factory, registry)
}

/// Helper: the nth probe created so far.
fn probe(registry: &Arc<Mutex<Vec<ProbeHandle>>>, idx: usize) -> ProbeHandle {
    Arc::clone(&registry.lock().unwrap()[idx])
}

/// Helper: delivers an event through the probe's installed sink, exactly as
/// the engine would from its own callback.
fn emit(probe: &ProbeHandle, event: EngineEvent) {
    let s = probe.lock().unwrap();
    if let Some(sink) = &s.sink {
        sink(event);
    }
}

/// Helper: pushes a request through the probe's installed interceptor.
fn intercept(probe: &ProbeHandle, url: &str) {
    let s = probe.lock().unwrap();
    if let Some(interceptor) = &s.interceptor {
        interceptor(InterceptedRequest {
            url: url.to_string(),
            method: "GET".to_string(),
            headers: HashMap::new(),
            body: None,
        });
    }
}

/// Helper: orchestrator with probe engines and inert wiring, for tests that
/// drive events through handle_engine_event directly.
fn orchestrator() -> (SessionOrchestrator, Arc<Mutex<Vec<ProbeHandle>>>) {
    let (factory, registry) = probe_factory();
    let wiring = SessionWiring {
        events: Box::new(|_| Box::new(|_| {})),
        requests: Box::new(|_| Box::new(|_| {})),
    };
    (SessionOrchestrator::new(factory, wiring), registry)
}

/// Helper: full shell over an in-memory database and probe engines. The
/// TempDir keeps the settings path alive for the test's duration.
fn shell() -> (BrowserShell, Arc<Mutex<Vec<ProbeHandle>>>, TempDir) {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.json").to_string_lossy().to_string();
    let (factory, registry) = probe_factory();
    let shell = BrowserShell::with_config(":memory:", Some(settings), factory).unwrap();
    (shell, registry, dir)
}

// ---------------------------------------------------------------------------
// Session creation
// ---------------------------------------------------------------------------

/// Creating a session activates it and reports an Opened notice.
#[test]
fn test_create_session_activates_it() {
    let (mut orch, _probes) = orchestrator();

    let a = orch.create_session(Some("https://a.example.com"));
    let b = orch.create_session(Some("https://b.example.com"));

    assert_eq!(orch.session_count(), 2);
    assert_eq!(orch.active_index(), Some(1));
    assert_eq!(orch.active_session().map(|s| s.id), Some(b));

    let notices = orch.take_notices();
    assert!(notices.contains(&SessionNotice::Opened(a)));
    assert!(notices.contains(&SessionNotice::Opened(b)));
}

/// The event sink and request interceptor are installed before the first
/// navigation command, so no early event can be lost.
#[test]
fn test_create_wires_engine_before_first_command() {
    let (mut orch, probes) = orchestrator();
    orch.create_session(Some("https://example.com"));

    let calls = probe(&probes, 0).lock().unwrap().calls.clone();
    assert_eq!(
        calls,
        vec!["subscribe", "set_interceptor", "navigate https://example.com"]
    );
}

/// A session created without a target parks the invalid-URL placeholder and
/// enters the terminal error-content state.
#[test]
fn test_create_without_url_parks_error_content() {
    let (mut orch, probes) = orchestrator();
    let id = orch.create_session(None);

    let session = orch.session(id).unwrap();
    assert_eq!(session.state, SessionState::ErrorContent);
    assert!(session.state.is_terminal());
    assert_eq!(session.label(), "New Tab");

    let contents = probe(&probes, 0).lock().unwrap().contents.clone();
    assert_eq!(contents, vec![INVALID_URL_CONTENT.to_string()]);
}

/// Text that does not parse as an absolute URL is treated like a missing
/// target; creation itself still succeeds.
#[test]
fn test_create_with_unparseable_url_parks_error_content() {
    let (mut orch, probes) = orchestrator();
    let id = orch.create_session(Some("not a url at all"));

    assert_eq!(orch.session(id).unwrap().state, SessionState::ErrorContent);
    let calls = probe(&probes, 0).lock().unwrap().calls.clone();
    assert!(
        !calls.iter().any(|c| c.starts_with("navigate")),
        "no navigation may be attempted for an invalid target"
    );
}

/// Error-content sessions ignore navigation commands without failing.
#[test]
fn test_error_content_session_ignores_navigation() {
    let (mut orch, probes) = orchestrator();
    let id = orch.create_session(None);

    orch.navigate("https://example.com").unwrap();
    orch.reload().unwrap();
    orch.go_back().unwrap();

    assert_eq!(orch.session(id).unwrap().state, SessionState::ErrorContent);
    let calls = probe(&probes, 0).lock().unwrap().calls.clone();
    assert!(!calls.iter().any(|c| c.starts_with("navigate")));
    assert!(!calls.contains(&"reload".to_string()));
    assert!(!calls.contains(&"go_back".to_string()));
}

// ---------------------------------------------------------------------------
// Closing sessions
// ---------------------------------------------------------------------------

/// Closing the only session empties the collection and signals window
/// close; the shared UI state resets.
#[test]
fn test_close_sole_session_reports_window_closed() {
    let (mut orch, _probes) = orchestrator();
    let id = orch.create_session(Some("https://example.com"));

    let outcome = orch.close_session(id).unwrap();
    assert_eq!(outcome, CloseOutcome::WindowClosed);
    assert!(orch.is_empty());
    assert_eq!(orch.active_index(), None);
    assert_eq!(orch.ui_state().address_text, "");
}

/// Closing a middle session activates its left neighbor.
#[test]
fn test_close_middle_activates_left_neighbor() {
    let (mut orch, _probes) = orchestrator();
    let a = orch.create_session(Some("https://a.example.com"));
    let b = orch.create_session(Some("https://b.example.com"));
    let _c = orch.create_session(Some("https://c.example.com"));

    let outcome = orch.close_session(b).unwrap();
    assert_eq!(outcome, CloseOutcome::Switched(a));
    assert_eq!(orch.active_session().map(|s| s.id), Some(a));
}

/// Closing the first session has no left neighbor; the new first session
/// takes over.
#[test]
fn test_close_first_activates_new_first() {
    let (mut orch, _probes) = orchestrator();
    let a = orch.create_session(Some("https://a.example.com"));
    let b = orch.create_session(Some("https://b.example.com"));
    let _c = orch.create_session(Some("https://c.example.com"));

    let outcome = orch.close_session(a).unwrap();
    assert_eq!(outcome, CloseOutcome::Switched(b));
}

/// Closing the last session clamps to the new end of the strip.
#[test]
fn test_close_last_activates_previous() {
    let (mut orch, _probes) = orchestrator();
    let _a = orch.create_session(Some("https://a.example.com"));
    let b = orch.create_session(Some("https://b.example.com"));
    let c = orch.create_session(Some("https://c.example.com"));

    let outcome = orch.close_session(c).unwrap();
    assert_eq!(outcome, CloseOutcome::Switched(b));
    assert_eq!(orch.session_count(), 2);
}

/// Closing an unknown session reports NotFound.
#[test]
fn test_close_unknown_session_fails() {
    let (mut orch, _probes) = orchestrator();
    let id = orch.create_session(Some("https://example.com"));
    orch.close_session(id).unwrap();

    assert!(matches!(
        orch.close_session(id),
        Err(SessionError::NotFound(_))
    ));
}

/// Close unsubscribes the engine and removes its interceptor, cutting off
/// event delivery from that engine.
#[test]
fn test_close_unsubscribes_engine() {
    let (mut orch, probes) = orchestrator();
    let id = orch.create_session(Some("https://example.com"));
    orch.close_session(id).unwrap();

    let state = probe(&probes, 0);
    let s = state.lock().unwrap();
    assert!(!s.subscribed);
    assert!(s.interceptor.is_none());
    assert!(s.calls.contains(&"unsubscribe".to_string()));
    assert!(s.calls.contains(&"clear_interceptor".to_string()));
}

/// Events that arrive for a session already closed are dropped.
#[test]
fn test_event_after_close_is_dropped() {
    let (mut orch, _probes) = orchestrator();
    let keep = orch.create_session(Some("https://keep.example.com"));
    let gone = orch.create_session(Some("https://gone.example.com"));
    orch.close_session(gone).unwrap();

    let outcome = orch.handle_engine_event(
        gone,
        EngineEvent::TitleChanged("Ghost".to_string()),
        false,
    );
    assert!(outcome.is_none());
    assert_eq!(orch.session(keep).unwrap().title, "");
}

// ---------------------------------------------------------------------------
// Switching and cycling
// ---------------------------------------------------------------------------

/// Switching makes the target active and syncs the address bar to it.
#[test]
fn test_switch_session_syncs_ui() {
    let (mut orch, _probes) = orchestrator();
    let a = orch.create_session(Some("https://a.example.com"));
    orch.create_session(Some("https://b.example.com"));

    orch.take_notices();
    orch.switch_session(a).unwrap();

    assert_eq!(orch.active_session().map(|s| s.id), Some(a));
    assert_eq!(orch.ui_state().address_text, "https://a.example.com");
    assert!(orch.take_notices().contains(&SessionNotice::Changed(a)));
}

/// Switching to an unknown id reports NotFound and changes nothing.
#[test]
fn test_switch_unknown_session_fails() {
    let (mut orch, _probes) = orchestrator();
    let a = orch.create_session(Some("https://a.example.com"));
    let gone = orch.create_session(Some("https://b.example.com"));
    orch.close_session(gone).unwrap();

    assert!(matches!(
        orch.switch_session(gone),
        Err(SessionError::NotFound(_))
    ));
    assert_eq!(orch.active_session().map(|s| s.id), Some(a));
}

/// next/previous rotate cyclically across the strip.
#[test]
fn test_next_previous_cycle() {
    let (mut orch, _probes) = orchestrator();
    let a = orch.create_session(Some("https://a.example.com"));
    let _b = orch.create_session(Some("https://b.example.com"));
    let c = orch.create_session(Some("https://c.example.com"));

    // Active is c (last created); next wraps to the front.
    orch.next_session();
    assert_eq!(orch.active_session().map(|s| s.id), Some(a));

    // Previous from the front wraps to the back.
    orch.previous_session();
    assert_eq!(orch.active_session().map(|s| s.id), Some(c));
}

/// Cycling is a no-op with fewer than two sessions.
#[test]
fn test_cycling_single_session_is_noop() {
    let (mut orch, _probes) = orchestrator();
    let a = orch.create_session(Some("https://a.example.com"));

    orch.next_session();
    assert_eq!(orch.active_session().map(|s| s.id), Some(a));
    orch.previous_session();
    assert_eq!(orch.active_session().map(|s| s.id), Some(a));

    // Empty strip: still a no-op.
    orch.close_session(a).unwrap();
    orch.next_session();
    orch.previous_session();
    assert!(orch.is_empty());
}

// ---------------------------------------------------------------------------
// Navigation commands
// ---------------------------------------------------------------------------

/// navigate targets the active session, moves it to loading, and forwards
/// the command to its engine.
#[test]
fn test_navigate_updates_active_session() {
    let (mut orch, probes) = orchestrator();
    let id = orch.create_session(Some("https://start.example.com"));

    orch.navigate("https://next.example.com").unwrap();

    let session = orch.session(id).unwrap();
    assert_eq!(session.url, "https://next.example.com");
    assert_eq!(session.state, SessionState::Loading);
    assert_eq!(orch.ui_state().address_text, "https://next.example.com");

    let calls = probe(&probes, 0).lock().unwrap().calls.clone();
    assert!(calls.contains(&"navigate https://next.example.com".to_string()));
}

/// Every navigation command fails uniformly with no sessions open.
#[test]
fn test_navigation_with_no_sessions_fails() {
    let (mut orch, _probes) = orchestrator();

    assert!(matches!(
        orch.navigate("https://example.com"),
        Err(SessionError::NoActiveSession)
    ));
    assert!(matches!(orch.reload(), Err(SessionError::NoActiveSession)));
    assert!(matches!(orch.go_back(), Err(SessionError::NoActiveSession)));
    assert!(matches!(
        orch.go_forward(),
        Err(SessionError::NoActiveSession)
    ));
}

/// Back/forward commands are forwarded to the engine, and the UI state
/// mirrors the engine's history availability after each command.
#[test]
fn test_history_commands_sync_ui_flags() {
    let (mut orch, probes) = orchestrator();
    orch.create_session(Some("https://example.com"));

    {
        let state = probe(&probes, 0);
        let mut s = state.lock().unwrap();
        s.can_back = true;
        s.can_forward = true;
    }
    orch.go_back().unwrap();

    assert!(orch.ui_state().back_enabled);
    assert!(orch.ui_state().forward_enabled);
    let calls = probe(&probes, 0).lock().unwrap().calls.clone();
    assert!(calls.contains(&"go_back".to_string()));

    orch.go_forward().unwrap();
    let calls = probe(&probes, 0).lock().unwrap().calls.clone();
    assert!(calls.contains(&"go_forward".to_string()));
}

// ---------------------------------------------------------------------------
// Engine event routing
// ---------------------------------------------------------------------------

/// Title and icon events update the session's cached display fields.
#[test]
fn test_title_and_icon_events_cached() {
    let (mut orch, _probes) = orchestrator();
    let id = orch.create_session(Some("https://example.com"));

    orch.handle_engine_event(id, EngineEvent::TitleChanged("Example".to_string()), false);
    orch.handle_engine_event(
        id,
        EngineEvent::IconChanged(Some("https://example.com/favicon.ico".to_string())),
        false,
    );

    let session = orch.session(id).unwrap();
    assert_eq!(session.title, "Example");
    assert_eq!(
        session.icon.as_deref(),
        Some("https://example.com/favicon.ico")
    );
}

/// Labels are the title cut to fifteen characters.
#[test]
fn test_label_truncates_long_titles() {
    let (mut orch, _probes) = orchestrator();
    let id = orch.create_session(Some("https://example.com"));

    orch.handle_engine_event(
        id,
        EngineEvent::TitleChanged("This Title Is Much Too Long".to_string()),
        false,
    );

    assert_eq!(orch.session(id).unwrap().label(), "This Title Is M");
    assert_eq!(orch.labels(), vec!["This Title Is M".to_string()]);
}

/// A URL change on the active session refreshes the address bar; the same
/// event on a background session does not.
#[test]
fn test_url_changed_syncs_only_active_ui() {
    let (mut orch, _probes) = orchestrator();
    let a = orch.create_session(Some("https://a.example.com"));
    let _b = orch.create_session(Some("https://b.example.com"));

    // a is in the background now.
    orch.handle_engine_event(
        a,
        EngineEvent::UrlChanged("https://a.example.com/moved".to_string()),
        false,
    );
    assert_eq!(orch.ui_state().address_text, "https://b.example.com");
    assert_eq!(orch.session(a).unwrap().url, "https://a.example.com/moved");

    orch.switch_session(a).unwrap();
    assert_eq!(orch.ui_state().address_text, "https://a.example.com/moved");
}

/// A successful load produces an outcome that asks for a history entry.
#[test]
fn test_load_finished_produces_outcome() {
    let (mut orch, _probes) = orchestrator();
    let id = orch.create_session(Some("https://example.com"));
    orch.handle_engine_event(id, EngineEvent::TitleChanged("Example".to_string()), false);

    let outcome = orch
        .handle_engine_event(id, EngineEvent::LoadFinished { ok: true }, false)
        .unwrap();

    assert!(outcome.ok);
    assert!(outcome.record_history);
    assert_eq!(outcome.url, "https://example.com");
    assert_eq!(outcome.title, "Example");
    assert_eq!(orch.session(id).unwrap().state, SessionState::Loaded);
}

/// A failed load parks the load-failure placeholder and asks for no
/// history entry.
#[test]
fn test_failed_load_parks_placeholder() {
    let (mut orch, probes) = orchestrator();
    let id = orch.create_session(Some("https://unreachable.example.com"));

    let outcome = orch
        .handle_engine_event(id, EngineEvent::LoadFinished { ok: false }, false)
        .unwrap();

    assert!(!outcome.ok);
    assert!(!outcome.record_history);
    let contents = probe(&probes, 0).lock().unwrap().contents.clone();
    assert_eq!(contents, vec![LOAD_FAILED_CONTENT.to_string()]);
}

/// Loads that settle on a placeholder URL never ask for history.
#[test]
fn test_placeholder_url_never_records_history() {
    let (mut orch, _probes) = orchestrator();
    let id = orch.create_session(Some("about:blank"));

    let outcome = orch
        .handle_engine_event(id, EngineEvent::LoadFinished { ok: true }, false)
        .unwrap();
    assert!(!outcome.record_history);
}

/// Dark mode is re-applied on every load finish: the enable script when the
/// flag is on, the removal script when it is off.
#[test]
fn test_dark_mode_applied_on_load_finish() {
    let (mut orch, probes) = orchestrator();
    let id = orch.create_session(Some("https://example.com"));

    orch.handle_engine_event(id, EngineEvent::LoadFinished { ok: true }, true);
    {
        let state = probe(&probes, 0);
        let s = state.lock().unwrap();
        assert_eq!(s.scripts.len(), 1);
        assert!(s.scripts[0].contains("invert(1)"));
    }

    orch.handle_engine_event(id, EngineEvent::UrlChanged("https://example.com/x".into()), true);
    orch.handle_engine_event(id, EngineEvent::LoadFinished { ok: true }, false);
    let state = probe(&probes, 0);
    let s = state.lock().unwrap();
    assert_eq!(s.scripts.len(), 2);
    assert!(s.scripts[1].contains("remove()"));
}

// ---------------------------------------------------------------------------
// Shell-level flows
// ---------------------------------------------------------------------------

/// A successful load pumped through the shell writes one history entry
/// with the page title.
#[test]
fn test_shell_records_history_on_successful_load() {
    let (mut shell, probes, _dir) = shell();
    shell.create_session(Some("https://rust-lang.org/"));

    let p = probe(&probes, 0);
    emit(&p, EngineEvent::TitleChanged("Rust".to_string()));
    emit(&p, EngineEvent::LoadFinished { ok: true });
    shell.pump();

    let manager = HistoryManager::new(shell.db.connection());
    let entries = manager.list_history().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Rust");
    assert_eq!(entries[0].url, "https://rust-lang.org/");
}

/// A load finishing without any title event falls back to the URL as the
/// history display text.
#[test]
fn test_shell_history_falls_back_to_url_title() {
    let (mut shell, probes, _dir) = shell();
    shell.create_session(Some("https://rust-lang.org/"));

    emit(&probe(&probes, 0), EngineEvent::LoadFinished { ok: true });
    shell.pump();

    let manager = HistoryManager::new(shell.db.connection());
    let entries = manager.list_history().unwrap();
    assert_eq!(entries[0].title, "https://rust-lang.org/");
}

/// Failed loads write no history.
#[test]
fn test_shell_skips_history_on_failed_load() {
    let (mut shell, probes, _dir) = shell();
    shell.create_session(Some("https://unreachable.example.com"));

    emit(&probe(&probes, 0), EngineEvent::LoadFinished { ok: false });
    shell.pump();

    let manager = HistoryManager::new(shell.db.connection());
    assert!(manager.list_history().unwrap().is_empty());
}

/// Requests intercepted by a session's engine land in the monitor after a
/// pump.
#[test]
fn test_shell_routes_intercepted_requests() {
    let (mut shell, probes, _dir) = shell();
    shell.create_session(Some("https://example.com/"));

    intercept(&probe(&probes, 0), "https://example.com/style.css");
    shell.pump();

    assert_eq!(shell.monitor.len(), 1);
    let records = shell.monitor.by_url_substring("style.css");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].method, "GET");
}

/// When the page load finishes, its captured main-document request is
/// completed with a synthetic status.
#[test]
fn test_shell_finishes_page_record_on_load() {
    let (mut shell, probes, _dir) = shell();
    shell.create_session(Some("https://example.com/"));

    let p = probe(&probes, 0);
    intercept(&p, "https://example.com/");
    emit(&p, EngineEvent::LoadFinished { ok: true });
    shell.pump();

    let records = shell.monitor.by_status(200);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, "https://example.com/");
    assert!(records[0].is_finished());
    assert!(records[0].error.is_none());
}

/// Toggling the bookmark on the active page adds it, reports the indicator
/// state, and removes it on the second toggle.
#[test]
fn test_shell_toggle_bookmark_roundtrip() {
    let (mut shell, _probes, _dir) = shell();
    shell.create_session(Some("https://rust-lang.org/"));

    assert!(!shell.active_is_bookmarked());
    assert!(shell.toggle_bookmark().unwrap());
    assert!(shell.active_is_bookmarked());
    assert_eq!(shell.list_bookmarks().unwrap().len(), 1);

    assert!(!shell.toggle_bookmark().unwrap());
    assert!(!shell.active_is_bookmarked());
    assert!(shell.list_bookmarks().unwrap().is_empty());
}

/// Placeholder pages are never bookmarkable and never read as bookmarked.
#[test]
fn test_shell_bookmark_ignores_placeholder_pages() {
    let (mut shell, _probes, _dir) = shell();
    shell.create_session(None);

    assert!(!shell.active_is_bookmarked());
    assert!(!shell.toggle_bookmark().unwrap());
    assert!(shell.list_bookmarks().unwrap().is_empty());
}

/// open_address opens a first session when the strip is empty and
/// navigates the active session afterwards; unresolvable input is refused.
#[test]
fn test_shell_open_address() {
    let (mut shell, probes, _dir) = shell();

    assert!(!shell.open_address("   ").unwrap());
    assert_eq!(shell.orchestrator.session_count(), 0);

    assert!(shell.open_address("example.com").unwrap());
    assert_eq!(shell.orchestrator.session_count(), 1);
    let calls = probe(&probes, 0).lock().unwrap().calls.clone();
    assert!(calls.contains(&"navigate https://example.com".to_string()));

    assert!(shell.open_address("rust tutorial").unwrap());
    assert_eq!(shell.orchestrator.session_count(), 1, "navigates in place");
    let calls = probe(&probes, 0).lock().unwrap().calls.clone();
    assert!(calls
        .contains(&"navigate https://www.google.com/search?q=rust+tutorial".to_string()));
}
