//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Repository search client
#[derive(Parser, Debug)]
#[command(name = "repo-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one search immediately
    Search {
        /// Search query
        query: String,
    },

    /// Treat each stdin line as an edit of the query text and search after a quiet window
    Watch,

    /// Print the effective configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one repository per line)
    Json,
    /// Human-readable output
    Pretty,
}
