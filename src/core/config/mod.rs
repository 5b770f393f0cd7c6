//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. `config.toml` in the storage directory (see [`crate::core::paths`])
//! 3. Environment (`FORKSCOUT_API_BASE`)
//! 4. CLI flags (not handled here)
//!
//! # Example
//!
//! ```no_run
//! use forkscout::core::config::Config;
//! use forkscout::core::paths::ForkscoutPaths;
//!
//! let paths = ForkscoutPaths::discover().unwrap();
//! let config = Config::load(&paths).unwrap();
//! assert!(config.api_base().starts_with("http"));
//! assert!(config.concurrency() >= 1);
//! ```

pub mod schema;

pub use schema::{FileConfig, MAX_CONCURRENCY};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use thiserror::Error;

use super::paths::ForkscoutPaths;
use super::types::SortKey;

/// Environment variable overriding the API base URL.
pub const API_BASE_ENV: &str = "FORKSCOUT_API_BASE";

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONCURRENCY: usize = 8;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("cannot determine config directory")]
    NoConfigDir,
}

/// Resolved configuration.
///
/// Accessors apply defaults, so callers never see an unset value.
#[derive(Debug, Clone, Default)]
pub struct Config {
    file: FileConfig,
    /// API base from the environment, if set
    env_api_base: Option<String>,
}

impl Config {
    /// Load configuration from the storage directory and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read, parsed,
    /// or validated. A missing file is not an error.
    pub fn load(paths: &ForkscoutPaths) -> Result<Self, ConfigError> {
        Self::load_with_env(paths, |key| std::env::var(key).ok())
    }

    /// Load configuration, reading environment variables through `env`.
    pub fn load_with_env<F>(paths: &ForkscoutPaths, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = paths.config_file();
        let file = if path.exists() {
            debug!("loading config from {}", path.display());
            Self::read_file(&path)?
        } else {
            FileConfig::default()
        };
        file.validate()?;

        let env_api_base = env(API_BASE_ENV).filter(|v| !v.trim().is_empty());
        if let Some(base) = &env_api_base {
            FileConfig {
                api_base: Some(base.clone()),
                ..Default::default()
            }
            .validate()?;
        }

        Ok(Self { file, env_api_base })
    }

    fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// API base URL, without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.env_api_base
            .as_deref()
            .or(self.file.api_base.as_deref())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
    }

    /// Overall run timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Timeout for a single HTTP request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.file
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Enrichment concurrency, clamped to `1..=MAX_CONCURRENCY`.
    pub fn concurrency(&self) -> usize {
        self.file
            .concurrency
            .unwrap_or(DEFAULT_CONCURRENCY)
            .clamp(1, MAX_CONCURRENCY)
    }

    /// Sort key used when none is given on the command line.
    pub fn default_sort(&self) -> SortKey {
        self.file
            .default_sort
            .as_deref()
            .map(SortKey::parse_lenient)
            .unwrap_or_default()
    }
}
