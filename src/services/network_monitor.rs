// MiniBrowser Network Activity Monitor
// Captures intercepted page requests into a bounded FIFO buffer, correlates
// completion events back onto their records, and serves filtered views,
// aggregate statistics, and a JSON export of the live buffer.

use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tracing::{debug, info};
use url::Url;

use crate::engine::InterceptedRequest;
use crate::types::errors::MonitorError;
use crate::types::request::{
    ExportedRequest, FinishTarget, HostInfo, HostLookup, MonitorNotice, NetworkRequestRecord,
    RequestId, RequestStatistics,
};

/// Default bound on the live request buffer.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Trait defining the network activity monitor interface.
pub trait NetworkActivityMonitorTrait {
    fn set_monitoring(&mut self, enabled: bool);
    fn is_monitoring(&self) -> bool;
    fn capture(
        &mut self,
        url: &str,
        method: &str,
        headers: HashMap<String, String>,
        body: Option<Vec<u8>>,
    ) -> Option<RequestId>;
    fn finish(
        &mut self,
        target: FinishTarget,
        status: Option<u16>,
        response_headers: HashMap<String, String>,
        size: u64,
        error: Option<&str>,
    ) -> bool;
    fn by_url_substring(&self, fragment: &str) -> Vec<&NetworkRequestRecord>;
    fn by_status(&self, status: u16) -> Vec<&NetworkRequestRecord>;
    fn by_mime_prefix(&self, prefix: &str) -> Vec<&NetworkRequestRecord>;
    fn statistics(&self) -> RequestStatistics;
    fn export(&self) -> Vec<ExportedRequest>;
    fn clear(&mut self);
}

/// Monitor holding the bounded buffer and its URL correlation index.
pub struct NetworkActivityMonitor {
    capacity: usize,
    monitoring: bool,
    next_id: u64,
    records: VecDeque<NetworkRequestRecord>,
    /// Latest (most recently captured) live record per URL, used to
    /// correlate completions that arrive without an id. Under concurrent
    /// same-URL requests this picks the newest record, an accepted
    /// approximation.
    by_url: HashMap<String, RequestId>,
    pending_lookups: Vec<HostLookup>,
    notices: Vec<MonitorNotice>,
}

impl NetworkActivityMonitor {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            monitoring: true,
            next_id: 0,
            records: VecDeque::new(),
            by_url: HashMap::new(),
            pending_lookups: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RequestId) -> Option<&NetworkRequestRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records in insertion (oldest-first) order.
    pub fn records(&self) -> impl Iterator<Item = &NetworkRequestRecord> {
        self.records.iter()
    }

    /// Convenience wrapper for requests arriving from an engine interceptor.
    pub fn capture_intercepted(&mut self, request: InterceptedRequest) -> Option<RequestId> {
        self.capture(&request.url, &request.method, request.headers, request.body)
    }

    /// Patches a record with the outcome of its background host lookup.
    /// The record may have been evicted in the meantime; that is not an
    /// error, the result is simply dropped.
    pub fn apply_ip_result(&mut self, id: RequestId, result: Result<IpAddr, String>) {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            debug!(request = %id, "lookup result for evicted record dropped");
            return;
        };
        match result {
            Ok(ip) => record.ip = Some(ip),
            Err(e) => {
                if record.error.is_none() {
                    record.error = Some(e);
                }
            }
        }
        self.notices.push(MonitorNotice::Updated(id));
    }

    /// Drains host lookups queued by `capture` since the last call. The
    /// caller resolves them off the event loop and feeds results back
    /// through [`apply_ip_result`].
    pub fn take_pending_lookups(&mut self) -> Vec<HostLookup> {
        std::mem::take(&mut self.pending_lookups)
    }

    /// Drains added/updated notices accumulated since the last call.
    pub fn take_notices(&mut self) -> Vec<MonitorNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Serializes the live buffer to a pretty-printed JSON array.
    pub fn export_json(&self) -> Result<String, MonitorError> {
        serde_json::to_string_pretty(&self.export())
            .map_err(|e| MonitorError::ExportFailed(e.to_string()))
    }

    fn evict_oldest(&mut self) {
        if let Some(old) = self.records.pop_front() {
            // only drop the index entry if it still points at the evicted
            // record; a newer same-URL capture owns the entry otherwise
            if self.by_url.get(&old.url) == Some(&old.id) {
                self.by_url.remove(&old.url);
            }
            debug!(request = %old.id, url = %old.url, "record evicted");
        }
    }

    fn index_of(&self, target: &FinishTarget) -> Option<usize> {
        match target {
            FinishTarget::Id(id) => self.records.iter().position(|r| r.id == *id),
            FinishTarget::Url(url) => {
                let id = *self.by_url.get(url)?;
                self.records.iter().position(|r| r.id == id)
            }
        }
    }
}

impl Default for NetworkActivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkActivityMonitorTrait for NetworkActivityMonitor {
    /// Process-wide toggle. While disabled, captures are dropped before
    /// they reach the buffer, so neither the views nor the statistics skew.
    fn set_monitoring(&mut self, enabled: bool) {
        self.monitoring = enabled;
        info!(enabled, "network monitoring toggled");
    }

    fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    /// Captures one outgoing request. Synchronous and non-blocking: the
    /// host lookup is only queued here, never performed. Returns the
    /// assigned id, or `None` while monitoring is disabled.
    fn capture(
        &mut self,
        url: &str,
        method: &str,
        headers: HashMap<String, String>,
        body: Option<Vec<u8>>,
    ) -> Option<RequestId> {
        if !self.monitoring {
            return None;
        }

        let id = RequestId(self.next_id);
        self.next_id += 1;

        while self.records.len() >= self.capacity {
            self.evict_oldest();
        }

        self.records.push_back(NetworkRequestRecord {
            id,
            url: url.to_string(),
            method: method.to_string(),
            headers,
            body,
            captured_at: unix_now(),
            started: Instant::now(),
            completed_at: None,
            duration_ms: None,
            status: None,
            response_headers: HashMap::new(),
            size: 0,
            mime_type: None,
            ip: None,
            error: None,
        });
        self.by_url.insert(url.to_string(), id);

        if let Some(info) = host_info(url) {
            self.pending_lookups.push(HostLookup {
                id,
                host: info.host,
            });
        }

        self.notices.push(MonitorNotice::Added(id));
        debug!(request = %id, method, url, "request captured");
        Some(id)
    }

    /// Completes a record, locating it by id when known and falling back to
    /// the latest record for the URL otherwise. Returns whether a record was
    /// updated; a missing or already-finished target is a no-op.
    fn finish(
        &mut self,
        target: FinishTarget,
        status: Option<u16>,
        response_headers: HashMap<String, String>,
        size: u64,
        error: Option<&str>,
    ) -> bool {
        let Some(idx) = self.index_of(&target) else {
            debug!(?target, "completion for unknown request dropped");
            return false;
        };
        let record = &mut self.records[idx];
        if record.is_finished() {
            debug!(request = %record.id, "duplicate completion dropped");
            return false;
        }

        record.completed_at = Some(unix_now());
        record.duration_ms = Some(record.started.elapsed().as_secs_f64() * 1000.0);
        record.status = status;
        record.mime_type = derived_mime(&response_headers);
        record.response_headers = response_headers;
        record.size = size;
        if let Some(e) = error {
            record.error = Some(e.to_string());
        }

        let id = record.id;
        self.notices.push(MonitorNotice::Updated(id));
        debug!(request = %id, status = ?status, size, "request finished");
        true
    }

    /// Records whose URL contains `fragment` (ASCII case-insensitive),
    /// newest first.
    fn by_url_substring(&self, fragment: &str) -> Vec<&NetworkRequestRecord> {
        let needle = fragment.to_ascii_lowercase();
        self.records
            .iter()
            .rev()
            .filter(|r| r.url.to_ascii_lowercase().contains(&needle))
            .collect()
    }

    /// Records that finished with `status`, newest first.
    fn by_status(&self, status: u16) -> Vec<&NetworkRequestRecord> {
        self.records
            .iter()
            .rev()
            .filter(|r| r.status == Some(status))
            .collect()
    }

    /// Records whose derived MIME type starts with `prefix`, newest first.
    fn by_mime_prefix(&self, prefix: &str) -> Vec<&NetworkRequestRecord> {
        self.records
            .iter()
            .rev()
            .filter(|r| {
                r.mime_type
                    .as_deref()
                    .is_some_and(|mime| mime.starts_with(prefix))
            })
            .collect()
    }

    /// Aggregates over the live buffer. Zero requests produce all-zero
    /// statistics; the average is computed only over records with a known
    /// duration.
    fn statistics(&self) -> RequestStatistics {
        let mut stats = RequestStatistics::default();
        stats.total_requests = self.records.len();

        let mut timed = 0usize;
        for record in &self.records {
            stats.total_bytes += record.size;
            if let Some(duration) = record.duration_ms {
                stats.total_duration_ms += duration;
                timed += 1;
            }
            if let Some(status) = record.status {
                *stats.status_counts.entry(status).or_insert(0) += 1;
            }
            if let Some(mime) = &record.mime_type {
                *stats.mime_counts.entry(mime.clone()).or_insert(0) += 1;
            }
        }
        if timed > 0 {
            stats.average_duration_ms = stats.total_duration_ms / timed as f64;
        }
        stats
    }

    /// Read-only projection of the live buffer in insertion order.
    fn export(&self) -> Vec<ExportedRequest> {
        self.records.iter().map(ExportedRequest::from).collect()
    }

    /// Empties the buffer and every derived structure. Ids are not reused
    /// afterwards.
    fn clear(&mut self) {
        self.records.clear();
        self.by_url.clear();
        self.pending_lookups.clear();
        info!("network monitor cleared");
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// MIME type derived from a `Content-Type` header: the part before the
/// first `;`, trimmed. Header lookup is case-insensitive.
fn derived_mime(headers: &HashMap<String, String>) -> Option<String> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| {
            value
                .split(';')
                .next()
                .unwrap_or("")
                .trim()
                .to_string()
        })
        .filter(|mime| !mime.is_empty())
}

/// Host and port of a request URL, with the scheme's well-known port when
/// none is explicit. Returns `None` for URLs without a host.
pub fn host_info(url: &str) -> Option<HostInfo> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_string();
    let port = parsed.port_or_known_default().unwrap_or(0);
    Some(HostInfo { host, port })
}

/// Human-readable byte size, stepping through KB/MB/GB/TB at 1024.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
