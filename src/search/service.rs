//! Search service seam between the controller and the network

use crate::error::Result;
use crate::http::ApiClient;
use crate::models::SearchResult;
use async_trait::async_trait;

/// Anything that can answer a repository search
#[async_trait]
pub trait RepositorySearch: Send + Sync {
    /// Run one search for `query`
    async fn search(&self, query: &str) -> Result<SearchResult>;
}

#[async_trait]
impl RepositorySearch for ApiClient {
    async fn search(&self, query: &str) -> Result<SearchResult> {
        ApiClient::search(self, query).await
    }
}
