//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Validation
//!
//! Values are validated after parsing so that a broken config file fails
//! the run up front instead of surfacing as an odd network error later.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Upper bound for per-fork enrichment concurrency.
pub const MAX_CONCURRENCY: usize = 32;

/// Contents of `config.toml`. Every field is optional.
///
/// # Example
///
/// ```toml
/// api_base = "https://github.example.com/api/v3"
/// timeout_secs = 600
/// request_timeout_secs = 20
/// concurrency = 4
/// default_sort = "stars"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// API base URL (GitHub Enterprise installations differ)
    pub api_base: Option<String>,

    /// Overall run timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,

    /// Number of forks enriched at once
    pub concurrency: Option<usize>,

    /// Sort key used when `--sort` is not given
    pub default_sort: Option<String>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base) = &self.api_base {
            if base.trim().is_empty() {
                return Err(ConfigError::InvalidValue("api_base cannot be empty".into()));
            }
            if !(base.starts_with("https://") || base.starts_with("http://")) {
                return Err(ConfigError::InvalidValue(format!(
                    "api_base '{}' must start with http:// or https://",
                    base
                )));
            }
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.concurrency == Some(0) {
            return Err(ConfigError::InvalidValue(
                "concurrency must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
