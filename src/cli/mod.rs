//! CLI module
//!
//! Command-line interface for searching repositories.
//!
//! # Commands
//!
//! - `search` - Run one search immediately
//! - `watch` - Debounced searching driven by stdin lines
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{format_repository, Runner};
