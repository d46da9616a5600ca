//! Async driver for the shell's background work.
//!
//! The shell itself is synchronous and single-context; the two operations
//! that must not stall it (host lookups queued by request capture and the
//! debounced remote suggestion fetch) run here as spawned tasks. Each task
//! posts exactly one [`DriverEvent`] back, and `settle` feeds results into
//! the shell between pumps.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use crate::app::BrowserShell;
use crate::services::remote_suggest::RemoteSuggestClient;
use crate::types::errors::SuggestError;
use crate::types::request::{HostLookup, RequestId};
use crate::types::suggestion::{RemoteQuery, SearchHit};

/// Completion of one background operation.
#[derive(Debug)]
pub enum DriverEvent {
    /// Host lookup outcome for a captured request.
    Lookup {
        id: RequestId,
        result: Result<IpAddr, String>,
    },
    /// Remote suggestion fetch outcome, tagged with its staleness token.
    RemoteSuggestions {
        token: u64,
        result: Result<Vec<SearchHit>, SuggestError>,
    },
}

/// Spawns and collects the shell's background tasks.
pub struct ShellDriver {
    resolver: TokioAsyncResolver,
    suggest: Arc<RemoteSuggestClient>,
    events_tx: UnboundedSender<DriverEvent>,
    events_rx: UnboundedReceiver<DriverEvent>,
    in_flight: usize,
}

impl ShellDriver {
    /// Builds a driver using the system resolver configuration, falling
    /// back to the library defaults when none can be read.
    pub fn new() -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|_| {
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            resolver,
            suggest: Arc::new(RemoteSuggestClient::new()),
            events_tx,
            events_rx,
            in_flight: 0,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Fire-and-forget host resolution; the record is patched when the
    /// result comes back, and a failure becomes the record's error field.
    pub fn spawn_lookup(&mut self, lookup: HostLookup) {
        let resolver = self.resolver.clone();
        let tx = self.events_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = match resolver.lookup_ip(lookup.host.as_str()).await {
                Ok(ips) => ips
                    .iter()
                    .next()
                    .ok_or_else(|| String::from("no addresses returned")),
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(DriverEvent::Lookup {
                id: lookup.id,
                result,
            });
        });
    }

    /// Issues the debounced remote suggestion fetch for `query`.
    pub fn spawn_fetch(&mut self, query: RemoteQuery) {
        let client = self.suggest.clone();
        let tx = self.events_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = client.fetch(&query.text).await;
            let _ = tx.send(DriverEvent::RemoteSuggestions {
                token: query.token,
                result,
            });
        });
    }

    /// Routes one completed background operation into the shell. Fetch
    /// failures are treated as "no remote suggestions", never surfaced.
    pub fn apply(&self, shell: &mut BrowserShell, event: DriverEvent) {
        match event {
            DriverEvent::Lookup { id, result } => shell.monitor.apply_ip_result(id, result),
            DriverEvent::RemoteSuggestions { token, result } => match result {
                Ok(hits) => shell.apply_remote_suggestions(token, hits),
                Err(e) => debug!(error = %e, "remote suggestions unavailable"),
            },
        }
    }

    /// Pumps the shell and drives background work until nothing is queued,
    /// in flight, or pending on the debounce timer.
    pub async fn settle(&mut self, shell: &mut BrowserShell) {
        loop {
            shell.pump();
            for lookup in shell.take_pending_lookups() {
                self.spawn_lookup(lookup);
            }
            if let Some(query) = shell.due_remote_query() {
                self.spawn_fetch(query);
            }

            let deadline = shell.aggregator.next_deadline();
            if self.in_flight == 0 && deadline.is_none() {
                shell.pump();
                return;
            }

            tokio::select! {
                maybe = self.events_rx.recv(), if self.in_flight > 0 => {
                    if let Some(event) = maybe {
                        self.in_flight -= 1;
                        self.apply(shell, event);
                    }
                }
                _ = tokio::time::sleep_until(
                    tokio::time::Instant::from_std(deadline.unwrap_or_else(Instant::now))
                ), if deadline.is_some() => {}
            }
        }
    }
}

impl Default for ShellDriver {
    fn default() -> Self {
        Self::new()
    }
}
