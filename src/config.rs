//! Application configuration
//!
//! Everything tunable lives here and is passed explicitly into the
//! [`ApiClient`](crate::http::ApiClient) and
//! [`SearchController`](crate::search::SearchController) constructors.
//! Configuration can be loaded from YAML; every field has a default.
//!
//! ```yaml
//! api:
//!   search_url: https://api.github.com/search/repositories
//!   timeout_secs: 10
//! search:
//!   quiet_window_ms: 500
//!   ordering: latest_wins
//! messages:
//!   error_title: ERROR
//! ```

use crate::error::{Error, Result};
use crate::search::ResponseOrdering;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Repository search endpoint of the public GitHub API
pub const DEFAULT_SEARCH_URL: &str = "https://api.github.com/search/repositories";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Search API settings
    pub api: ApiConfig,

    /// Debounce and response handling
    pub search: SearchConfig,

    /// User-facing failure text
    pub messages: MessagesConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        let search_url = Url::parse(&self.api.search_url)?;
        if !matches!(search_url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "search_url must be http or https, got '{}'",
                self.api.search_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(Error::config("user_agent must not be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// API Config
// ============================================================================

/// Settings for the search endpoint and the HTTP client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Search endpoint, without query string
    pub search_url: String,

    /// Value of the `sort` query parameter
    pub sort: String,

    /// Value of the `order` query parameter
    pub order: String,

    /// User agent string (the GitHub API rejects requests without one)
    pub user_agent: String,

    /// Accept header
    pub accept: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            sort: "stars".to_string(),
            order: "desc".to_string(),
            user_agent: format!("repo-search/{}", env!("CARGO_PKG_VERSION")),
            accept: "application/vnd.github.v3+json".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Create a new config builder
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Builder for API config
#[derive(Default)]
pub struct ApiConfigBuilder {
    config: ApiConfig,
}

impl ApiConfigBuilder {
    /// Set the search endpoint
    pub fn search_url(mut self, url: impl Into<String>) -> Self {
        self.config.search_url = url.into();
        self
    }

    /// Set the sort field and order
    pub fn sort(mut self, sort: impl Into<String>, order: impl Into<String>) -> Self {
        self.config.sort = sort.into();
        self.config.order = order.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ApiConfig {
        self.config
    }
}

// ============================================================================
// Search Config
// ============================================================================

/// Debounce window and response ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search fires
    pub quiet_window_ms: u64,

    /// What to do with responses of superseded searches
    pub ordering: ResponseOrdering,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            quiet_window_ms: 500,
            ordering: ResponseOrdering::default(),
        }
    }
}

impl SearchConfig {
    /// Quiet window as a duration
    pub fn quiet_window(&self) -> Duration {
        Duration::from_millis(self.quiet_window_ms)
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Text shown by the presentation layer when a search fails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Heading of the failure notice
    pub error_title: String,

    /// Body of the failure notice
    pub error_message: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            error_title: "ERROR".to_string(),
            error_message: "Something is wrong".to_string(),
        }
    }
}
