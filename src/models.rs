//! Search API records
//!
//! Both records are built entirely from [`RawPayload`] getters.

use crate::decode::{DecodeError, Decodable, RawPayload};
use serde::Serialize;
use url::Url;

/// Body of a repository search response
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResult {
    /// Matching repositories, in response order
    pub items: Vec<Repository>,
}

impl SearchResult {
    /// Number of repositories in the result
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the result has no repositories
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Decodable for SearchResult {
    fn decode(payload: &RawPayload) -> Result<Self, DecodeError> {
        Ok(Self {
            items: payload.get_array("items")?,
        })
    }
}

/// One repository entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    /// Web page of the repository
    pub html_url: Url,
    /// `owner/name`
    pub full_name: String,
    /// Primary language, when GitHub detected one
    pub language: Option<String>,
    /// Number of stars
    pub stargazers_count: u64,
}

impl Repository {
    /// Star count as shown next to a result row
    pub fn star_label(&self) -> String {
        format!("★{}", self.stargazers_count)
    }

    /// Secondary line of a result row
    pub fn subtitle(&self) -> &str {
        self.language.as_deref().unwrap_or_default()
    }
}

impl Decodable for Repository {
    fn decode(payload: &RawPayload) -> Result<Self, DecodeError> {
        Ok(Self {
            html_url: payload.get("html_url")?,
            full_name: payload.get("full_name")?,
            language: payload.get_optional("language")?,
            stargazers_count: payload.get("stargazers_count")?,
        })
    }
}
