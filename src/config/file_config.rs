//! Configuration file discovery and generation.
//!
//! # Configuration File Format
//!
//! ```toml
//! base_url = "https://thunder.api.overdrive.com"
//! request_timeout_secs = 5
//! max_page_size = 100
//! search_deadline_secs = 60
//! libraries = ["lexpublib", "nypl"]
//! formats = ["ebook-overdrive", "audiobook-overdrive"]
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::path::{Path, PathBuf};

use super::SearchConfig;

const LOCAL_CONFIG_NAME: &str = "library-search.toml";
const APP_DIR_NAME: &str = "library-search";

/// Locate a configuration file.
///
/// Checks `./library-search.toml`, then `library-search/config.toml` under the
/// platform config directory.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
        .filter(|path| path.is_file())
}

/// Write `config` as TOML, creating parent directories as needed
pub fn write_config_file(path: &Path, config: &SearchConfig) -> Result<(), ConfigFileError> {
    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }

    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
