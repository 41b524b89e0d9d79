//! Endpoint descriptors
//!
//! An endpoint is an immutable description of one network call: where it
//! goes, with which method, and what it decodes into.

use crate::config::ApiConfig;
use crate::decode::Decodable;
use crate::error::Result;
use crate::models::SearchResult;
use crate::types::Method;
use url::Url;

/// Description of a single API call
pub trait Endpoint {
    /// Record the response body decodes into
    type Output: Decodable;

    /// Full request URL, query string included
    fn url(&self) -> &Url;

    /// HTTP method
    fn method(&self) -> Method;

    /// The user query this endpoint was built from
    fn query(&self) -> &str;
}

/// `GET <search_url>?q=<query>&sort=<sort>&order=<order>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRepositories {
    url: Url,
    method: Method,
    query: String,
}

impl SearchRepositories {
    /// Build the endpoint for a user-entered query
    pub fn new(config: &ApiConfig, query: &str) -> Result<Self> {
        let mut url = Url::parse(&config.search_url)?;
        url.query_pairs_mut()
            .clear()
            .append_pair("q", query)
            .append_pair("sort", &config.sort)
            .append_pair("order", &config.order);

        Ok(Self {
            url,
            method: Method::GET,
            query: query.to_string(),
        })
    }
}

impl Endpoint for SearchRepositories {
    type Output = SearchResult;

    fn url(&self) -> &Url {
        &self.url
    }

    fn method(&self) -> Method {
        self.method
    }

    fn query(&self) -> &str {
        &self.query
    }
}
