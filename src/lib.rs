#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

//! # repo-search
//!
//! A client for the GitHub repository search API built around a small,
//! type-safe decoding framework.
//!
//! ## Features
//!
//! - **Typed decoding**: required/optional field getters over a parsed JSON object,
//!   backed by pluggable converters (primitives, nested objects, arrays, URLs, timestamps)
//! - **Single-call client**: one request per search, every failure returned as a value
//! - **Debounced searching**: rapid query edits collapse into one search after a quiet window,
//!   with stale responses dropped by sequence number
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use repo_search::{ApiClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ApiClient::new()?;
//!     let result = client.search("tokio").await?;
//!     for repo in &result.items {
//!         println!("{} {}", repo.full_name, repo.star_label());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! query text ──► search::Debouncer ──► search::SearchController
//!                                              │
//!                                      http::ApiClient (GET)
//!                                              │ bytes
//!                                      decode::RawPayload ──► models::SearchResult
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Typed JSON decoding engine and converters
pub mod decode;

/// Search API records
pub mod models;

/// Endpoint descriptors and the API client
pub mod http;

/// Debouncer and search controller
pub mod search;

/// Application configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::AppConfig;
pub use decode::{DecodeError, Decodable, RawPayload};
pub use error::{Error, Result};
pub use http::ApiClient;
pub use models::{Repository, SearchResult};
pub use search::{SearchController, SearchEvent};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
