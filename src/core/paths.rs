//! core::paths
//!
//! Centralized path routing for forkscout storage locations.
//!
//! # Storage Layout
//!
//! Everything lives in a single directory:
//! - `config.toml` - User configuration
//! - `credentials.json` - Stored access token
//!
//! The directory is `$FORKSCOUT_HOME` when set, otherwise the platform
//! config directory (`~/.config/forkscout` on Linux,
//! `~/Library/Application Support/forkscout` on macOS,
//! `%APPDATA%\forkscout` on Windows).
//!
//! # Example
//!
//! ```
//! use forkscout::core::paths::ForkscoutPaths;
//! use std::path::PathBuf;
//!
//! let paths = ForkscoutPaths::new(PathBuf::from("/home/me/.config/forkscout"));
//! assert_eq!(
//!     paths.credentials_file(),
//!     PathBuf::from("/home/me/.config/forkscout/credentials.json")
//! );
//! ```

use std::path::{Path, PathBuf};

use super::config::ConfigError;

/// Environment variable overriding the storage directory.
pub const HOME_ENV: &str = "FORKSCOUT_HOME";

const APP_NAME: &str = "forkscout";
const CONFIG_FILE: &str = "config.toml";
const CREDENTIALS_FILE: &str = "credentials.json";

/// Storage locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkscoutPaths {
    root: PathBuf,
}

impl ForkscoutPaths {
    /// Route all storage under `root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve the storage directory from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if `$FORKSCOUT_HOME` is unset and
    /// the platform has no config directory.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(PathBuf::from(home)));
        }
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(base.join(APP_NAME)))
    }

    /// The storage directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.root.join(CREDENTIALS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_root() {
        let paths = ForkscoutPaths::new(PathBuf::from("/tmp/fs"));
        assert_eq!(paths.root(), Path::new("/tmp/fs"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/fs/config.toml"));
        assert_eq!(
            paths.credentials_file(),
            PathBuf::from("/tmp/fs/credentials.json")
        );
    }
}
