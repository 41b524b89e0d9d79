//! HTTP client module
//!
//! Describes the search endpoint and performs the network call.
//!
//! # Features
//!
//! - **Endpoint descriptors**: immutable URL + method + query, typed by the record they decode into
//! - **Single round trip**: no retries, no backoff; every failure is returned to the caller
//! - **Typed bodies**: response bytes go through the [`decode`](crate::decode) engine

mod client;
mod endpoint;

pub use client::{decode_body, ApiClient};
pub use endpoint::{Endpoint, SearchRepositories};
