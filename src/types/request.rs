use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;
use std::time::Instant;

/// Monotonic identity of a captured request, unique per monitor instance.
/// Ids are never reused, not even after `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One captured network request and, once finished, its completion data.
///
/// Identity is immutable after capture; the completion fields are written
/// exactly once by `finish`, and `ip`/`error` may additionally be patched by
/// the out-of-band lookup result.
#[derive(Debug, Clone)]
pub struct NetworkRequestRecord {
    pub id: RequestId,
    pub url: String,
    pub method: String,
    /// Best-effort: the engine may not expose request headers.
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
    /// Wall-clock capture time, UTC seconds.
    pub captured_at: i64,
    /// Monotonic base for the duration computation.
    pub started: Instant,
    /// Wall-clock completion time, UTC seconds. `Some` marks the record finished.
    pub completed_at: Option<i64>,
    pub duration_ms: Option<f64>,
    pub status: Option<u16>,
    pub response_headers: HashMap<String, String>,
    pub size: u64,
    /// Content-Type up to the first `;`, trimmed.
    pub mime_type: Option<String>,
    pub ip: Option<IpAddr>,
    pub error: Option<String>,
}

impl NetworkRequestRecord {
    pub fn is_finished(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Flat export projection of a request record (the wire format of the
/// monitor's JSON export).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportedRequest {
    pub id: u64,
    pub url: String,
    pub method: String,
    pub status: Option<u16>,
    pub headers: HashMap<String, String>,
    pub response_headers: HashMap<String, String>,
    pub size: u64,
    pub duration: Option<f64>,
    pub mime_type: Option<String>,
    pub ip: Option<String>,
    pub error: Option<String>,
}

impl From<&NetworkRequestRecord> for ExportedRequest {
    fn from(record: &NetworkRequestRecord) -> Self {
        Self {
            id: record.id.0,
            url: record.url.clone(),
            method: record.method.clone(),
            status: record.status,
            headers: record.headers.clone(),
            response_headers: record.response_headers.clone(),
            size: record.size,
            duration: record.duration_ms,
            mime_type: record.mime_type.clone(),
            ip: record.ip.map(|ip| ip.to_string()),
            error: record.error.clone(),
        }
    }
}

/// Aggregate view over the live buffer. All-zero when no requests exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestStatistics {
    pub total_requests: usize,
    pub total_bytes: u64,
    pub total_duration_ms: f64,
    /// Average over records with a known duration only.
    pub average_duration_ms: f64,
    pub status_counts: HashMap<u16, usize>,
    pub mime_counts: HashMap<String, usize>,
}

/// How a completion event identifies its originating record: by id when the
/// caller knows it, else by URL (resolved to the most recent capture).
#[derive(Debug, Clone)]
pub enum FinishTarget {
    Id(RequestId),
    Url(String),
}

/// A background host lookup the monitor wants performed for a fresh capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostLookup {
    pub id: RequestId,
    pub host: String,
}

/// Hostname and effective port of a request URL, for the detail pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    pub host: String,
    pub port: u16,
}

/// Notification published by the monitor for presentation listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorNotice {
    /// A record entered the buffer.
    Added(RequestId),
    /// An existing record gained completion or lookup data.
    Updated(RequestId),
}
