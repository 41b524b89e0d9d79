//! Search controller
//!
//! The single consumer that owns the debouncer, the displayed results and the
//! request sequence counter. All state is mutated from the task running
//! [`SearchController::run`]; network calls run on spawned tasks and report
//! back over a channel.

use super::debouncer::Debouncer;
use super::service::RepositorySearch;
use super::types::{ResponseOrdering, SearchEvent, SearchFailure};
use crate::config::{AppConfig, MessagesConfig};
use crate::error::Result;
use crate::models::{Repository, SearchResult};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// A finished network call
struct Completion {
    seq: u64,
    query: String,
    result: Result<SearchResult>,
}

/// Debounced, sequence-numbered search driver
pub struct SearchController {
    service: Arc<dyn RepositorySearch>,
    debouncer: Debouncer,
    ordering: ResponseOrdering,
    messages: MessagesConfig,
    results: Vec<Repository>,
    latest_seq: u64,
    in_flight: usize,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    events: mpsc::UnboundedSender<SearchEvent>,
}

impl SearchController {
    /// Create a controller and the receiver for its events
    pub fn new(
        service: Arc<dyn RepositorySearch>,
        config: &AppConfig,
    ) -> (Self, mpsc::UnboundedReceiver<SearchEvent>) {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (events, events_rx) = mpsc::unbounded_channel();

        let controller = Self {
            service,
            debouncer: Debouncer::new(config.search.quiet_window()),
            ordering: config.search.ordering,
            messages: config.messages.clone(),
            results: Vec::new(),
            latest_seq: 0,
            in_flight: 0,
            completion_tx,
            completion_rx,
            events,
        };
        (controller, events_rx)
    }

    /// Currently displayed results
    pub fn results(&self) -> &[Repository] {
        &self.results
    }

    /// Sequence number of the most recent trigger (0 before the first).
    ///
    /// An empty query takes a number too, so it supersedes searches in flight.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// No timer pending and no network call outstanding
    pub fn is_idle(&self) -> bool {
        !self.debouncer.is_pending() && self.in_flight == 0
    }

    /// Query text changed: restart the quiet window with the new text
    pub fn text_changed(&mut self, text: impl Into<String>) {
        self.debouncer.schedule(text);
    }

    /// Process query-text changes from `input` until it closes and all
    /// outstanding work has finished. Returns the final displayed results.
    pub async fn run(mut self, mut input: mpsc::Receiver<String>) -> Vec<Repository> {
        let mut input_open = true;

        loop {
            if !input_open && self.is_idle() {
                break;
            }

            let timer_armed = self.debouncer.is_pending();
            let awaiting = self.in_flight > 0;

            tokio::select! {
                text = input.recv(), if input_open => match text {
                    Some(text) => self.text_changed(text),
                    None => {
                        debug!("Input closed, draining outstanding searches");
                        input_open = false;
                    }
                },
                query = self.debouncer.expired(), if timer_armed => self.trigger(query),
                Some(done) = self.completion_rx.recv(), if awaiting => self.complete(done),
                else => break,
            }
        }

        self.results
    }

    /// Debounce window elapsed: clear results and issue the search
    fn trigger(&mut self, query: String) {
        self.results.clear();
        self.emit(SearchEvent::Cleared);
        self.latest_seq += 1;
        let seq = self.latest_seq;

        if query.is_empty() {
            debug!("Empty query #{}, nothing to search", seq);
            return;
        }

        self.in_flight += 1;
        debug!("Starting search #{} for {:?}", seq, query);
        self.emit(SearchEvent::Started {
            seq,
            query: query.clone(),
        });

        let service = Arc::clone(&self.service);
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = service.search(&query).await;
            // The receiver lives as long as the controller
            let _ = completion_tx.send(Completion { seq, query, result });
        });
    }

    /// Apply (or drop) a finished network call
    fn complete(&mut self, done: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let Completion { seq, query, result } = done;

        if self.ordering == ResponseOrdering::LatestWins && seq != self.latest_seq {
            debug!(
                "Dropping response #{} for {:?}, latest is #{}",
                seq, query, self.latest_seq
            );
            self.emit(SearchEvent::Discarded { seq, query });
            return;
        }

        match result {
            Ok(found) => {
                debug!("Search #{} returned {} repositories", seq, found.len());
                self.results.extend(found.items);
                self.emit(SearchEvent::Results {
                    seq,
                    query,
                    repositories: self.results.clone(),
                });
            }
            Err(e) => {
                debug!("Search #{} failed: {}", seq, e);
                let failure = SearchFailure::new(&self.messages, &e);
                self.emit(SearchEvent::Failed {
                    seq,
                    query,
                    failure,
                });
            }
        }
    }

    fn emit(&self, event: SearchEvent) {
        // A dropped receiver means nobody is displaying results any more
        let _ = self.events.send(event);
    }
}
