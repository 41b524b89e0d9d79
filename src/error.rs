//! Error types for repo-search
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Field-level decode failures live in [`crate::decode::DecodeError`] and are
//! wrapped by [`Error::Decode`] at the client boundary.

use crate::decode::DecodeError;
use thiserror::Error;

/// The main error type for repo-search
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("Response body was empty")]
    EmptyBody,

    #[error("Unexpected response type: top-level JSON value is not an object")]
    UnexpectedResponseType,

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("{0}")]
    Decode(#[from] DecodeError),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The decode failure behind this error, if any
    pub fn as_decode(&self) -> Option<&DecodeError> {
        match self {
            Error::Decode(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the failure came from the network layer rather than the payload
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }
}

/// Result type alias for repo-search
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix an error with a lazily built description of what was being done
pub trait ResultExt<T> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
