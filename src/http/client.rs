//! Search API client
//!
//! Performs exactly one network round trip per call, with no retries, and
//! turns the body into a typed record:
//! - transport failures are passed through as [`Error::Http`]
//! - an empty body is [`Error::EmptyBody`]
//! - a body whose top level is not a JSON object is [`Error::UnexpectedResponseType`]
//! - anything else is decoded, with field failures surfacing as [`Error::Decode`]

use super::endpoint::{Endpoint, SearchRepositories};
use crate::config::ApiConfig;
use crate::decode::{Decodable, RawPayload};
use crate::error::{Error, Result};
use crate::models::SearchResult;
use crate::types::JsonValue;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use tracing::{debug, warn};

/// HTTP client for the repository search API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ApiConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let accept = HeaderValue::from_str(&config.accept)
            .map_err(|e| Error::config(format!("Invalid accept header: {e}")))?;
        headers.insert(ACCEPT, accept);

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Search repositories matching `query`.
    ///
    /// An empty query is answered with an empty result and no network call.
    pub async fn search(&self, query: &str) -> Result<SearchResult> {
        if query.is_empty() {
            debug!("Empty query, skipping search request");
            return Ok(SearchResult::default());
        }
        self.request(&SearchRepositories::new(&self.config, query)?)
            .await
    }

    /// Issue the request described by `endpoint` and decode its body
    pub async fn request<E: Endpoint>(&self, endpoint: &E) -> Result<E::Output> {
        debug!(
            "Request: {} {} (query {:?})",
            endpoint.method(),
            endpoint.url(),
            endpoint.query()
        );

        let response = self
            .client
            .request(endpoint.method().into(), endpoint.url().clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Search API answered {}, decoding body anyway", status.as_u16());
        }

        let body = response.bytes().await?;
        debug!("Response: {} ({} bytes)", status.as_u16(), body.len());
        decode_body(&body)
    }
}

/// Turn a raw response body into a decoded record
pub fn decode_body<T: Decodable>(body: &[u8]) -> Result<T> {
    if body.is_empty() {
        return Err(Error::EmptyBody);
    }

    let value: JsonValue = serde_json::from_slice(body)?;
    let payload = RawPayload::from_value(value).ok_or(Error::UnexpectedResponseType)?;
    Ok(T::decode(&payload)?)
}
