//! Query debouncing
//!
//! Coalesces rapid query-text changes into a single search after a quiet
//! window. At most one [`PendingSearch`] exists at a time; scheduling a new
//! one drops (and so cancels) the previous timer before it can fire.

use std::future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep_until, Instant, Sleep};
use tracing::trace;

/// A scheduled search: the captured query and its timer
#[derive(Debug)]
pub struct PendingSearch {
    query: String,
    timer: Pin<Box<Sleep>>,
}

impl PendingSearch {
    /// Query text captured when the search was scheduled
    pub fn query(&self) -> &str {
        &self.query
    }

    /// When the search fires
    pub fn deadline(&self) -> Instant {
        self.timer.deadline()
    }
}

/// Debounce state machine: idle, or pending with one timer
#[derive(Debug)]
pub struct Debouncer {
    quiet_window: Duration,
    pending: Option<PendingSearch>,
}

impl Debouncer {
    /// Create an idle debouncer
    pub fn new(quiet_window: Duration) -> Self {
        Self {
            quiet_window,
            pending: None,
        }
    }

    /// Quiet window applied to every scheduled search
    pub fn quiet_window(&self) -> Duration {
        self.quiet_window
    }

    /// Replace any pending search with one for `query`, due a quiet window from now
    pub fn schedule(&mut self, query: impl Into<String>) {
        let query = query.into();
        let deadline = Instant::now() + self.quiet_window;

        if let Some(previous) = self.pending.take() {
            trace!("Cancelling pending search for {:?}", previous.query);
        }
        trace!("Scheduling search for {:?}", query);

        self.pending = Some(PendingSearch {
            query,
            timer: Box::pin(sleep_until(deadline)),
        });
    }

    /// Drop the pending search, if any. Returns whether one was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Whether a search is scheduled
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The scheduled search, if any
    pub fn pending(&self) -> Option<&PendingSearch> {
        self.pending.as_ref()
    }

    /// Wait for the pending search to fire and return its query.
    ///
    /// Never resolves while idle. Cancel safe: dropping the future before it
    /// completes leaves the pending search in place.
    pub async fn expired(&mut self) -> String {
        let Some(pending) = self.pending.as_mut() else {
            return future::pending().await;
        };
        pending.timer.as_mut().await;

        let query = self.pending.take().map(|p| p.query).unwrap_or_default();
        trace!("Debounce window elapsed for {:?}", query);
        query
    }
}
