//! Configuration management.

mod file_config;

pub use file_config::{find_config_file, write_config_file, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::sources::SearchError;

/// Thunder API root used when no other base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://thunder.api.overdrive.com";

/// Largest `perPage` the catalog accepts
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Library searched when none is given
pub const DEFAULT_LIBRARY: &str = "lexpublib";

/// Search configuration shared by every catalog source.
///
/// Passed by value into sources and the aggregator; nothing reads it from
/// global state, so tests can shrink timeouts and page sizes freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// API root; each library is searched at `{base_url}/v2/libraries/{id}/media`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for a single HTTP request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on the page size sent as `perPage`
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Catalog format codes, sent as one comma-joined `format` value
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,

    /// Overall deadline across every page of every library
    #[serde(default)]
    pub search_deadline_secs: Option<u64>,

    /// Libraries to search, in order
    #[serde(default = "default_libraries")]
    pub libraries: Vec<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            max_page_size: default_max_page_size(),
            formats: default_formats(),
            search_deadline_secs: None,
            libraries: default_libraries(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_max_page_size() -> usize {
    DEFAULT_MAX_PAGE_SIZE
}

fn default_formats() -> Vec<String> {
    [
        "ebook-overdrive",
        "ebook-media-do",
        "ebook-overdrive-provisional",
        "audiobook-overdrive",
        "audiobook-overdrive-provisional",
        "magazine-overdrive",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_libraries() -> Vec<String> {
    vec![DEFAULT_LIBRARY.to_string()]
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

impl SearchConfig {
    /// Set the API root
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Set the maximum page size
    pub fn max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size;
        self
    }

    /// Set the overall search deadline
    pub fn search_deadline_secs(mut self, secs: Option<u64>) -> Self {
        self.search_deadline_secs = secs;
        self
    }

    /// Replace the configured libraries
    pub fn libraries<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.libraries = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn search_deadline(&self) -> Option<Duration> {
        self.search_deadline_secs.map(Duration::from_secs)
    }

    /// The `format` query value: each code encoded, joined with literal commas.
    /// The catalog rejects both repeated `format=` keys and an encoded `%2C`.
    pub fn format_param(&self) -> String {
        self.formats
            .iter()
            .map(|f| urlencoding::encode(f).into_owned())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Search endpoint for one library
    pub fn library_search_url(&self, library_id: &str) -> String {
        format!(
            "{}/v2/libraries/{}/media",
            self.base_url.trim_end_matches('/'),
            library_id
        )
    }

    /// Reject settings no search could succeed with
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_page_size == 0 {
            return Err(SearchError::Configuration(
                "max_page_size must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(SearchError::Configuration(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.formats.is_empty() {
            return Err(SearchError::Configuration(
                "at least one catalog format is required".to_string(),
            ));
        }
        if self.libraries.iter().all(|id| id.trim().is_empty()) {
            return Err(SearchError::Configuration(
                "at least one library id is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration, layering `LIBRARY_SEARCH_*` environment overrides over
/// an optional TOML file and the defaults
pub fn load_config(path: Option<&Path>) -> Result<SearchConfig, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix("LIBRARY_SEARCH")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("libraries")
                .with_list_parse_key("formats"),
        )
        .build()?;

    settings.try_deserialize()
}
