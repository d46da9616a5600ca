//! In-process engine with no rendering: tracks url/title and a back/forward
//! stack, emits the same event sequence a real engine would, and invokes the
//! request interceptor for each simulated fetch. Used by tests and the demo
//! binary.

use std::collections::HashMap;

use url::Url;

use super::{EngineEvent, EventSink, InterceptedRequest, RenderEngine, RequestInterceptor};

/// Scriptable stand-in for a real rendering engine.
pub struct HeadlessEngine {
    url: String,
    title: String,
    content: Option<String>,
    past: Vec<String>,
    future: Vec<String>,
    scripts: Vec<String>,
    sink: Option<EventSink>,
    interceptor: Option<RequestInterceptor>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self {
            url: String::new(),
            title: String::new(),
            content: None,
            past: Vec::new(),
            future: Vec::new(),
            scripts: Vec::new(),
            sink: None,
            interceptor: None,
        }
    }

    fn emit(&self, event: EngineEvent) {
        if let Some(sink) = &self.sink {
            sink(event);
        }
    }

    fn fire_request(&self, url: &str, method: &str) {
        if let Some(interceptor) = &self.interceptor {
            let mut headers = HashMap::new();
            headers.insert("User-Agent".to_string(), "minibrowser-headless".to_string());
            headers.insert("Accept".to_string(), "*/*".to_string());
            interceptor(InterceptedRequest {
                url: url.to_string(),
                method: method.to_string(),
                headers,
                body: None,
            });
        }
    }

    fn title_for(url: &str) -> String {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| url.to_string())
    }

    /// Emits a `TitleChanged` as a page would after running its own scripts.
    pub fn set_page_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.emit(EngineEvent::TitleChanged(title.to_string()));
    }

    /// Emits an `IconChanged` for the current page.
    pub fn set_page_icon(&mut self, icon_url: Option<&str>) {
        self.emit(EngineEvent::IconChanged(icon_url.map(str::to_string)));
    }

    /// Simulates a sub-resource fetch: only the interceptor fires, no
    /// navigation events.
    pub fn fetch_resource(&mut self, url: &str, method: &str) {
        self.fire_request(url, method);
    }

    /// Reports the current load as failed, as an engine does on network or
    /// HTTP errors.
    pub fn simulate_failed_load(&mut self) {
        self.emit(EngineEvent::LoadFinished { ok: false });
    }

    /// Literal HTML installed by the last `set_content`, if any.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Scripts executed via `run_script`, oldest first.
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderEngine for HeadlessEngine {
    fn navigate(&mut self, url: &str) {
        if !self.url.is_empty() {
            self.past.push(self.url.clone());
        }
        self.future.clear();
        self.url = url.to_string();
        self.title = Self::title_for(url);
        self.content = None;

        self.fire_request(url, "GET");
        self.emit(EngineEvent::UrlChanged(url.to_string()));
        self.emit(EngineEvent::TitleChanged(self.title.clone()));
        self.emit(EngineEvent::LoadFinished { ok: true });
    }

    fn set_content(&mut self, html: &str) {
        self.content = Some(html.to_string());
        self.url = "about:blank".to_string();
        self.emit(EngineEvent::UrlChanged(self.url.clone()));
        self.emit(EngineEvent::LoadFinished { ok: true });
    }

    fn reload(&mut self) {
        if self.url.is_empty() {
            return;
        }
        let url = self.url.clone();
        self.fire_request(&url, "GET");
        self.emit(EngineEvent::LoadFinished { ok: true });
    }

    fn go_back(&mut self) {
        if let Some(prev) = self.past.pop() {
            let current = std::mem::replace(&mut self.url, prev.clone());
            self.future.push(current);
            self.title = Self::title_for(&prev);
            self.emit(EngineEvent::UrlChanged(prev));
            self.emit(EngineEvent::LoadFinished { ok: true });
        }
    }

    fn go_forward(&mut self) {
        if let Some(next) = self.future.pop() {
            let current = std::mem::replace(&mut self.url, next.clone());
            self.past.push(current);
            self.title = Self::title_for(&next);
            self.emit(EngineEvent::UrlChanged(next));
            self.emit(EngineEvent::LoadFinished { ok: true });
        }
    }

    fn can_go_back(&self) -> bool {
        !self.past.is_empty()
    }

    fn can_go_forward(&self) -> bool {
        !self.future.is_empty()
    }

    fn current_url(&self) -> String {
        self.url.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn run_script(&mut self, script: &str) {
        self.scripts.push(script.to_string());
    }

    fn subscribe(&mut self, sink: EventSink) {
        self.sink = Some(sink);
    }

    fn unsubscribe(&mut self) {
        self.sink = None;
    }

    fn set_request_interceptor(&mut self, interceptor: RequestInterceptor) {
        self.interceptor = Some(interceptor);
    }

    fn clear_request_interceptor(&mut self) {
        self.interceptor = None;
    }
}
