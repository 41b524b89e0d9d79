//! Debounced search
//!
//! Query-text changes flow through the [`Debouncer`] into the
//! [`SearchController`], which clears the displayed results, issues the
//! network call through a [`RepositorySearch`] and reports [`SearchEvent`]s.
//!
//! ```text
//! input ──► Debouncer (quiet window) ──► trigger ──► RepositorySearch
//!                                          │               │
//!                                       Cleared      Results / Failed
//! ```

mod controller;
mod debouncer;
mod service;
mod types;

pub use controller::SearchController;
pub use debouncer::{Debouncer, PendingSearch};
pub use service::RepositorySearch;
pub use types::{ResponseOrdering, SearchEvent, SearchFailure};

#[cfg(test)]
mod tests;
