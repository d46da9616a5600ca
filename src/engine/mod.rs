// MiniBrowser rendering-engine boundary
// The shell never talks to a real engine directly; everything goes through
// the RenderEngine trait so the core stays testable without a webview.

pub mod headless;

pub use headless::HeadlessEngine;

use std::collections::HashMap;

/// Navigation lifecycle event emitted by a rendering engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UrlChanged(String),
    TitleChanged(String),
    IconChanged(Option<String>),
    LoadFinished { ok: bool },
}

/// An outgoing request observed by the engine before dispatch. Headers are
/// best-effort; engines that cannot expose them pass an empty map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptedRequest {
    pub url: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

/// Sink an engine delivers its lifecycle events into while subscribed.
pub type EventSink = Box<dyn Fn(EngineEvent) + Send>;

/// Callback invoked by the engine before each outgoing request.
pub type RequestInterceptor = Box<dyn Fn(InterceptedRequest) + Send>;

/// Contract between the shell and an embedded page-rendering engine.
///
/// One instance exists per tab session. Implementations perform the actual
/// navigation and I/O; the shell only consumes the events they emit. The
/// subscribe/unsubscribe pair is the cancellation boundary: after
/// `unsubscribe` returns, the engine must deliver no further events.
pub trait RenderEngine {
    /// Starts loading `url`.
    fn navigate(&mut self, url: &str);

    /// Replaces the page with literal HTML (placeholder/error pages).
    fn set_content(&mut self, html: &str);

    fn reload(&mut self);
    fn go_back(&mut self);
    fn go_forward(&mut self);

    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;

    fn current_url(&self) -> String;
    fn title(&self) -> String;

    /// Executes script in the page context (dark-mode injection).
    fn run_script(&mut self, script: &str);

    /// Begins delivering lifecycle events into `sink`.
    fn subscribe(&mut self, sink: EventSink);

    /// Stops event delivery. Idempotent.
    fn unsubscribe(&mut self);

    /// Installs the request-interceptor callback.
    fn set_request_interceptor(&mut self, interceptor: RequestInterceptor);

    /// Removes the interceptor. Idempotent.
    fn clear_request_interceptor(&mut self);
}
