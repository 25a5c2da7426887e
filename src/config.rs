//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::corpus::{DATA_DIR_NAME, DEFAULT_DATA_FILE, DEFAULT_HTTP_TIMEOUT_SECS};
use crate::error::Result;

/// Environment variable naming the verse dataset file.
pub const ENV_BIBLE_DATA: &str = "HOLYREF_BIBLE_DATA";
/// Environment variable naming the verse dataset URL.
pub const ENV_BIBLE_URL: &str = "HOLYREF_BIBLE_URL";
/// Environment variable naming the editor's log file.
pub const ENV_LOG_FILE: &str = "HOLYREF_LOG_FILE";
/// Environment variable overriding the HTTP timeout in seconds.
pub const ENV_HTTP_TIMEOUT: &str = "HOLYREF_HTTP_TIMEOUT_SECS";

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Local verse dataset (JSON array of verse records)
    pub bible_data_path: Option<PathBuf>,
    /// Remote verse dataset URL, used when no local file is configured
    pub bible_data_url: Option<String>,
    /// Where the editor writes its log; no logging when unset
    pub log_file: Option<PathBuf>,
    /// Timeout for fetching the remote dataset
    pub http_timeout: Duration,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            bible_data_path: None,
            bible_data_url: None,
            log_file: None,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::from_lookup(|key| env::var(key).ok());

        // Fall back to the platform data directory when nothing was configured
        if config.bible_data_path.is_none() && config.bible_data_url.is_none() {
            config.bible_data_path = detect_default_data_path();
        }

        Ok(config)
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.bible_data_path = lookup(ENV_BIBLE_DATA)
            .filter(|s| !s.trim().is_empty())
            .map(|path| expand_path(&path));

        config.bible_data_url = lookup(ENV_BIBLE_URL).filter(|s| !s.trim().is_empty());

        config.log_file = lookup(ENV_LOG_FILE)
            .filter(|s| !s.trim().is_empty())
            .map(|path| expand_path(&path));

        if let Some(secs) = lookup(ENV_HTTP_TIMEOUT).and_then(|s| s.trim().parse::<u64>().ok()) {
            config.http_timeout = Duration::from_secs(secs);
        }

        config
    }

    /// Check if any verse dataset source is configured
    pub const fn has_corpus_source(&self) -> bool {
        self.bible_data_path.is_some() || self.bible_data_url.is_some()
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.trim()).to_string())
}

/// Look for a dataset in the platform data directory.
fn detect_default_data_path() -> Option<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join(DATA_DIR_NAME).join(DEFAULT_DATA_FILE))
        .filter(|p| p.is_file())
}
