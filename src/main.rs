//! repo-search CLI
//!
//! Command-line interface for searching repositories

use anyhow::Context;
use clap::Parser;
use repo_search::cli::{Cli, Runner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let runner = Runner::new(cli);
    runner.run().await.context("repo-search failed")
}
