//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::AppConfig;
use crate::error::{Result, ResultExt};
use crate::http::ApiClient;
use crate::models::Repository;
use crate::search::{SearchController, SearchEvent};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        match &self.cli.command {
            Commands::Search { query } => self.search(config, query).await,
            Commands::Watch => self.watch(config).await,
            Commands::Config => self.show_config(&config),
        }
    }

    /// Load configuration from `--config`, or use defaults
    fn load_config(&self) -> Result<AppConfig> {
        match &self.cli.config {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                AppConfig::load(path)
            }
            None => Ok(AppConfig::default()),
        }
    }

    /// Search once and print the results
    async fn search(&self, config: AppConfig, query: &str) -> Result<()> {
        let client = ApiClient::with_config(config.api)?;
        let result = client
            .search(query)
            .await
            .with_context(|| format!("Search for {query:?} failed"))?;
        info!("{} repositories for {:?}", result.len(), query);

        for repo in &result.items {
            println!("{}", format_repository(repo, self.cli.format)?);
        }
        Ok(())
    }

    /// Feed stdin lines through the debounced controller
    async fn watch(&self, config: AppConfig) -> Result<()> {
        let client = ApiClient::with_config(config.api.clone())?;
        let (controller, mut events) = SearchController::new(Arc::new(client), &config);
        let (input_tx, input_rx) = mpsc::channel(32);

        let reader = tokio::spawn(forward_lines(BufReader::new(tokio::io::stdin()), input_tx));

        let format = self.cli.format;
        let printer = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                print_event(&event, format);
            }
        });

        let results = controller.run(input_rx).await;
        // The controller only returns once stdin is exhausted
        let _ = reader.await;
        let _ = printer.await;
        debug!("Watch finished with {} displayed repositories", results.len());
        Ok(())
    }

    /// Print the effective configuration
    fn show_config(&self, config: &AppConfig) -> Result<()> {
        print!("{}", config.to_yaml()?);
        Ok(())
    }
}

/// Render one repository as an output line
pub fn format_repository(repo: &Repository, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(repo)?),
        OutputFormat::Pretty => Ok(format!(
            "{:<48} {:<12} {}",
            repo.full_name,
            repo.subtitle(),
            repo.star_label()
        )),
    }
}

/// Send each input line as query text. Only the line terminator is stripped.
async fn forward_lines<R: AsyncBufRead + Unpin>(reader: R, tx: mpsc::Sender<String>) {
    let mut lines = reader.lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if tx.send(line).await.is_err() {
            break;
        }
    }
}

fn print_event(event: &SearchEvent, format: OutputFormat) {
    match event {
        SearchEvent::Cleared | SearchEvent::Discarded { .. } => {}
        SearchEvent::Started { query, .. } => eprintln!("Searching for {query:?}..."),
        SearchEvent::Results { repositories, .. } => {
            for repo in repositories {
                match format_repository(repo, format) {
                    Ok(line) => println!("{line}"),
                    Err(e) => eprintln!("Error: {e}"),
                }
            }
        }
        SearchEvent::Failed { failure, .. } => {
            eprintln!(
                "{}: {} ({})",
                failure.title, failure.message, failure.description
            );
        }
    }
}
