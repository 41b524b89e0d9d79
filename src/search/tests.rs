//! Tests for the search module
//!
//! All timing tests run on a paused clock, so durations are exact.

use super::*;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::models::{Repository, SearchResult};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout, Instant};
use url::Url;

const WINDOW: Duration = Duration::from_millis(500);

fn repo(name: &str) -> Repository {
    Repository {
        html_url: Url::parse(&format!("https://github.com/{name}")).unwrap(),
        full_name: name.to_string(),
        language: None,
        stargazers_count: 1,
    }
}

// ============================================================================
// Scripted service
// ============================================================================

#[derive(Clone)]
enum Outcome {
    Found(Vec<Repository>),
    EmptyBody,
}

/// Answers each query after a fixed delay and records when it was called
struct ScriptedSearch {
    start: Instant,
    script: HashMap<String, (Duration, Outcome)>,
    calls: Mutex<Vec<(String, Duration)>>,
}

impl ScriptedSearch {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            script: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn answer(mut self, query: &str, delay: Duration, outcome: Outcome) -> Self {
        self.script.insert(query.to_string(), (delay, outcome));
        self
    }

    fn calls(&self) -> Vec<(String, Duration)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepositorySearch for ScriptedSearch {
    async fn search(&self, query: &str) -> Result<SearchResult> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), self.start.elapsed()));

        let (delay, outcome) = self
            .script
            .get(query)
            .cloned()
            .unwrap_or((Duration::ZERO, Outcome::Found(Vec::new())));
        sleep(delay).await;

        match outcome {
            Outcome::Found(items) => Ok(SearchResult { items }),
            Outcome::EmptyBody => Err(Error::EmptyBody),
        }
    }
}

/// Feed `(delay_before, text)` inputs to a controller and collect everything it did
async fn drive(
    service: Arc<ScriptedSearch>,
    config: &AppConfig,
    inputs: Vec<(Duration, &str)>,
) -> (Vec<Repository>, Vec<SearchEvent>) {
    let (controller, mut events_rx) = SearchController::new(service, config);
    let (input_tx, input_rx) = mpsc::channel(16);
    let handle = tokio::spawn(controller.run(input_rx));

    for (delay, text) in inputs {
        sleep(delay).await;
        input_tx.send(text.to_string()).await.unwrap();
    }
    drop(input_tx);

    let results = handle.await.unwrap();
    let mut events = Vec::new();
    while let Some(event) = events_rx.recv().await {
        events.push(event);
    }
    (results, events)
}

// ============================================================================
// Debouncer Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_debouncer_single_event_fires_after_window() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(WINDOW);

    debouncer.schedule("rust");
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.pending().unwrap().query(), "rust");
    assert_eq!(debouncer.pending().unwrap().deadline(), start + WINDOW);

    let query = debouncer.expired().await;
    assert_eq!(query, "rust");
    assert_eq!(start.elapsed(), WINDOW);
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_debouncer_coalesces_rapid_events() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(WINDOW);

    debouncer.schedule("s");
    sleep(Duration::from_millis(100)).await;
    debouncer.schedule("sw");
    sleep(Duration::from_millis(100)).await;
    debouncer.schedule("swi");

    let query = debouncer.expired().await;
    assert_eq!(query, "swi");
    assert_eq!(start.elapsed(), Duration::from_millis(700));

    // Nothing else fires
    assert!(timeout(Duration::from_secs(10), debouncer.expired())
        .await
        .is_err());
}

#[tokio::test(start_paused = true)]
async fn test_debouncer_idle_never_fires() {
    let mut debouncer = Debouncer::new(WINDOW);
    assert!(timeout(Duration::from_secs(60), debouncer.expired())
        .await
        .is_err());
}

#[tokio::test(start_paused = true)]
async fn test_debouncer_cancel() {
    let mut debouncer = Debouncer::new(WINDOW);
    debouncer.schedule("rust");
    assert!(debouncer.cancel());
    assert!(!debouncer.cancel());
    assert!(timeout(WINDOW * 4, debouncer.expired()).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_debouncer_expired_is_cancel_safe() {
    let mut debouncer = Debouncer::new(WINDOW);
    debouncer.schedule("rust");

    // Give up halfway through the window; the search must still be pending
    assert!(timeout(WINDOW / 2, debouncer.expired()).await.is_err());
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.expired().await, "rust");
}

// ============================================================================
// Controller Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_controller_debounced_search() {
    let service = Arc::new(ScriptedSearch::new().answer(
        "swi",
        Duration::from_millis(20),
        Outcome::Found(vec![repo("a/b")]),
    ));

    let (results, events) = drive(
        Arc::clone(&service),
        &AppConfig::default(),
        vec![
            (Duration::ZERO, "s"),
            (Duration::from_millis(100), "sw"),
            (Duration::from_millis(100), "swi"),
        ],
    )
    .await;

    assert_eq!(
        service.calls(),
        vec![("swi".to_string(), Duration::from_millis(700))]
    );
    assert_eq!(results, vec![repo("a/b")]);
    assert_eq!(
        events,
        vec![
            SearchEvent::Cleared,
            SearchEvent::Started {
                seq: 1,
                query: "swi".to_string()
            },
            SearchEvent::Results {
                seq: 1,
                query: "swi".to_string(),
                repositories: vec![repo("a/b")],
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_controller_empty_query_clears_without_request() {
    let service = Arc::new(ScriptedSearch::new().answer(
        "rust",
        Duration::ZERO,
        Outcome::Found(vec![repo("rust-lang/rust")]),
    ));

    let (results, events) = drive(
        Arc::clone(&service),
        &AppConfig::default(),
        vec![(Duration::ZERO, "rust"), (Duration::from_secs(1), "")],
    )
    .await;

    let queries: Vec<String> = service.calls().into_iter().map(|(q, _)| q).collect();
    assert_eq!(queries, vec!["rust".to_string()]);
    assert!(results.is_empty());
    assert_eq!(events.last(), Some(&SearchEvent::Cleared));
}

#[tokio::test(start_paused = true)]
async fn test_controller_clearing_query_drops_in_flight_response() {
    let service = Arc::new(ScriptedSearch::new().answer(
        "slow",
        Duration::from_secs(2),
        Outcome::Found(vec![repo("slow/one")]),
    ));

    // "slow" fires at 0.5s and answers at 2.5s; the box is cleared at 1.5s
    let (results, events) = drive(
        service,
        &AppConfig::default(),
        vec![(Duration::ZERO, "slow"), (Duration::from_secs(1), "")],
    )
    .await;

    assert!(results.is_empty());
    assert_eq!(
        events,
        vec![
            SearchEvent::Cleared,
            SearchEvent::Started {
                seq: 1,
                query: "slow".to_string()
            },
            SearchEvent::Cleared,
            SearchEvent::Discarded {
                seq: 1,
                query: "slow".to_string()
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_controller_latest_wins_discards_stale_response() {
    let service = Arc::new(
        ScriptedSearch::new()
            .answer("slow", Duration::from_secs(1), Outcome::Found(vec![repo("slow/one")]))
            .answer(
                "fast",
                Duration::from_millis(50),
                Outcome::Found(vec![repo("fast/one")]),
            ),
    );

    // "slow" fires at 0.5s and answers at 1.5s; "fast" fires at 1.1s and answers at 1.15s
    let (results, events) = drive(
        service,
        &AppConfig::default(),
        vec![(Duration::ZERO, "slow"), (Duration::from_millis(600), "fast")],
    )
    .await;

    assert_eq!(results, vec![repo("fast/one")]);
    assert!(events.contains(&SearchEvent::Discarded {
        seq: 1,
        query: "slow".to_string()
    }));
}

#[tokio::test(start_paused = true)]
async fn test_controller_unordered_applies_every_response() {
    let service = Arc::new(
        ScriptedSearch::new()
            .answer("slow", Duration::from_secs(1), Outcome::Found(vec![repo("slow/one")]))
            .answer(
                "fast",
                Duration::from_millis(50),
                Outcome::Found(vec![repo("fast/one")]),
            ),
    );
    let mut config = AppConfig::default();
    config.search.ordering = ResponseOrdering::Unordered;

    let (results, events) = drive(
        service,
        &config,
        vec![(Duration::ZERO, "slow"), (Duration::from_millis(600), "fast")],
    )
    .await;

    assert_eq!(results, vec![repo("fast/one"), repo("slow/one")]);
    assert!(!events
        .iter()
        .any(|e| matches!(e, SearchEvent::Discarded { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_controller_failure_event() {
    let service = Arc::new(ScriptedSearch::new().answer(
        "broken",
        Duration::ZERO,
        Outcome::EmptyBody,
    ));
    let mut config = AppConfig::default();
    config.messages.error_message = "Search failed".to_string();

    let (results, events) = drive(service, &config, vec![(Duration::ZERO, "broken")]).await;

    assert!(results.is_empty());
    assert_eq!(
        events.last(),
        Some(&SearchEvent::Failed {
            seq: 1,
            query: "broken".to_string(),
            failure: SearchFailure {
                title: "ERROR".to_string(),
                message: "Search failed".to_string(),
                description: "Response body was empty".to_string(),
            },
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_controller_custom_window() {
    let service = Arc::new(ScriptedSearch::new());
    let mut config = AppConfig::default();
    config.search.quiet_window_ms = 200;

    drive(Arc::clone(&service), &config, vec![(Duration::ZERO, "rust")]).await;

    assert_eq!(
        service.calls(),
        vec![("rust".to_string(), Duration::from_millis(200))]
    );
}

#[tokio::test(start_paused = true)]
async fn test_controller_idle_before_input() {
    let (controller, _events) =
        SearchController::new(Arc::new(ScriptedSearch::new()), &AppConfig::default());
    assert!(controller.is_idle());
    assert_eq!(controller.latest_seq(), 0);
    assert!(controller.results().is_empty());
}
