// MiniBrowser Debounce Timer
// Cancel-and-restart timer with a monotonic generation token. Callbacks
// compare their token against the current generation before applying
// results, so work scheduled for superseded input is discarded instead of
// firing against stale state.

use std::time::{Duration, Instant};

/// A single-shot timer that is restarted on every new trigger.
///
/// The timer never spawns anything; callers pass the current [`Instant`] in
/// and poll for expiry, which keeps timing fully deterministic under test.
pub struct DebounceTimer {
    window: Duration,
    deadline: Option<Instant>,
    generation: u64,
}

impl DebounceTimer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
            generation: 0,
        }
    }

    /// Arms (or re-arms) the timer at `now + window` and invalidates every
    /// previously handed-out token. Returns the new token.
    pub fn restart(&mut self, now: Instant) -> u64 {
        self.generation += 1;
        self.deadline = Some(now + self.window);
        self.generation
    }

    /// Disarms the timer and invalidates every previously handed-out token.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.deadline = None;
    }

    /// Returns the current token if the timer has expired, disarming it.
    /// The token stays current afterwards: results produced by the fired
    /// action remain applicable until the next restart or cancel.
    pub fn poll_due(&mut self, now: Instant) -> Option<u64> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(self.generation)
            }
            _ => None,
        }
    }

    /// Whether `token` still refers to the latest trigger.
    pub fn is_current(&self, token: u64) -> bool {
        token == self.generation
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending expiry, if armed. Event loops use this to pick a sleep
    /// duration.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
