//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: query text → debounce → HTTP request → typed result

use repo_search::config::{ApiConfig, AppConfig};
use repo_search::decode::DecodeError;
use repo_search::search::{ResponseOrdering, SearchController, SearchEvent};
use repo_search::{ApiClient, Error};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig::builder()
        .search_url(Url::parse(&format!("{}/search/repositories", server.uri())).unwrap())
        .build()
}

async fn mount_swift(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "swift"))
        .and(query_param("sort", "stars"))
        .and(query_param("order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "html_url": "https://github.com/a/b",
                "full_name": "a/b",
                "language": "Swift",
                "stargazers_count": 42
            }]
        })))
        .mount(server)
        .await;
}

// ============================================================================
// API Client
// ============================================================================

#[tokio::test]
async fn test_search_swift_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_swift(&mock_server).await;

    let client = ApiClient::with_config(api_config(&mock_server)).unwrap();
    let result = client.search("swift").await.unwrap();

    assert_eq!(result.items.len(), 1);
    let repo = &result.items[0];
    assert_eq!(repo.full_name, "a/b");
    assert_eq!(repo.language.as_deref(), Some("Swift"));
    assert_eq!(repo.stargazers_count, 42);
    assert_eq!(repo.html_url.as_str(), "https://github.com/a/b");
}

#[tokio::test]
async fn test_empty_query_never_hits_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_config(api_config(&mock_server)).unwrap();
    assert!(client.search("").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_array_response_is_unexpected_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"full_name": "a/b"}
        ])))
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_config(api_config(&mock_server)).unwrap();
    let err = client.search("swift").await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedResponseType));
}

#[tokio::test]
async fn test_malformed_item_fails_whole_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"html_url": "https://github.com/a/b", "full_name": "a/b", "stargazers_count": 1},
                {"html_url": "not a url", "full_name": "c/d", "stargazers_count": 2}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_config(api_config(&mock_server)).unwrap();
    let err = client.search("rust").await.unwrap_err();
    assert_eq!(
        err.as_decode(),
        Some(&DecodeError::invalid_value("html_url", "not a url", "Invalid URL"))
    );
}

// ============================================================================
// Debounced Controller
// ============================================================================

#[tokio::test]
async fn test_debounced_search_through_client() {
    let mock_server = MockServer::start().await;
    mount_swift(&mock_server).await;

    let mut config = AppConfig::default();
    config.api = api_config(&mock_server);
    config.search.quiet_window_ms = 50;
    config.search.ordering = ResponseOrdering::LatestWins;

    let client = ApiClient::with_config(config.api.clone()).unwrap();
    let (controller, mut events) = SearchController::new(Arc::new(client), &config);
    let (input_tx, input_rx) = mpsc::channel(8);
    let handle = tokio::spawn(controller.run(input_rx));

    for text in ["s", "sw", "swi", "swif", "swift"] {
        input_tx.send(text.to_string()).await.unwrap();
    }
    drop(input_tx);

    let results = tokio::time::timeout(Duration::from_secs(10), handle)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].full_name, "a/b");

    let mut started = Vec::new();
    while let Some(event) = events.recv().await {
        if let SearchEvent::Started { query, .. } = event {
            started.push(query);
        }
    }
    assert_eq!(started, vec!["swift".to_string()]);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_debounced_failure_reports_event() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total_count": 0})))
        .mount(&mock_server)
        .await;

    let mut config = AppConfig::default();
    config.api = api_config(&mock_server);
    config.search.quiet_window_ms = 10;

    let client = ApiClient::with_config(config.api.clone()).unwrap();
    let (controller, mut events) = SearchController::new(Arc::new(client), &config);
    let (input_tx, input_rx) = mpsc::channel(8);
    let handle = tokio::spawn(controller.run(input_rx));

    input_tx.send("rust".to_string()).await.unwrap();
    drop(input_tx);
    let results = handle.await.unwrap();
    assert!(results.is_empty());

    let mut failure = None;
    while let Some(event) = events.recv().await {
        if let SearchEvent::Failed { failure: f, .. } = event {
            failure = Some(f);
        }
    }
    let failure = failure.expect("a failure event");
    assert_eq!(failure.title, "ERROR");
    assert_eq!(failure.message, "Something is wrong");
    assert_eq!(
        failure.description,
        "JSON Decode Error: Required key 'items' missing"
    );
}
