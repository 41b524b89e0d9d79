//! Search controller types

use crate::config::MessagesConfig;
use crate::error::Error;
use crate::models::Repository;
use serde::{Deserialize, Serialize};

/// How responses of superseded searches are treated.
///
/// Network calls are never cancelled once issued, so a later search can be
/// answered before an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrdering {
    /// Only the response of the most recently triggered search is applied
    #[default]
    LatestWins,
    /// Every response is applied in arrival order
    Unordered,
}

/// Notification sent from the controller to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Displayed results were cleared ahead of a new search
    Cleared,
    /// A network call was issued
    Started { seq: u64, query: String },
    /// A response was applied; `repositories` is the full displayed list
    Results {
        seq: u64,
        query: String,
        repositories: Vec<Repository>,
    },
    /// A search failed
    Failed {
        seq: u64,
        query: String,
        failure: SearchFailure,
    },
    /// A response arrived for a superseded search and was dropped
    Discarded { seq: u64, query: String },
}

/// What the presentation layer shows for a failed search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFailure {
    /// Configured heading
    pub title: String,
    /// Configured user-facing text
    pub message: String,
    /// Rendered error, for diagnostics
    pub description: String,
}

impl SearchFailure {
    /// Build the failure from configured text and the underlying error
    pub fn new(messages: &MessagesConfig, error: &Error) -> Self {
        Self {
            title: messages.error_title.clone(),
            message: messages.error_message.clone(),
            description: error.to_string(),
        }
    }
}
