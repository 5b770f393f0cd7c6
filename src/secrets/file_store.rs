//! secrets::file_store
//!
//! File-based credential storage.
//!
//! # Format
//!
//! `credentials.json` holds a single object: `{"token": "..."}`. Files
//! written by older releases used the key `PAT`, and a bare token on its own
//! line is accepted too; both are read transparently and rewritten in the
//! current format on the next save.
//!
//! # Security
//!
//! - File permissions are set to 0600 on Unix (owner read/write only)
//! - All writes are atomic (write to temp file, then rename)
//! - The token is NEVER logged, printed, or included in error messages

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use log::{debug, warn};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::traits::{validate_token, CredentialStore, SecretError};

/// On-disk shape of the credential file.
#[derive(Serialize, Deserialize)]
struct CredentialFile {
    #[serde(alias = "PAT")]
    token: String,
}

/// File-based credential storage.
///
/// # Example
///
/// ```ignore
/// use forkscout::secrets::{CredentialStore, FileCredentialStore};
///
/// let store = FileCredentialStore::with_path(paths.credentials_file());
/// store.save("ghp_xxxxx...")?;
///
/// if let Some(token) = store.load()? {
///     // Use token (never print it!)
/// }
///
/// store.delete()?;
/// ```
#[derive(Debug)]
pub struct FileCredentialStore {
    /// Path to the credentials file
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a credential store backed by `path`.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the path to the credentials file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the file with atomic rename and restrictive permissions.
    fn write_file(&self, credentials: &CredentialFile) -> Result<(), SecretError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SecretError::WriteError(format!("cannot create directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(credentials)
            .map_err(|e| SecretError::WriteError(format!("cannot serialize credentials: {}", e)))?;

        let temp_path = self.path.with_extension("tmp");

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| SecretError::WriteError(format!("cannot create temp file: {}", e)))?;

            // Restrict permissions before any secret bytes hit the disk.
            #[cfg(unix)]
            {
                let permissions = fs::Permissions::from_mode(0o600);
                file.set_permissions(permissions).map_err(|e| {
                    SecretError::WriteError(format!("cannot set permissions: {}", e))
                })?;
            }

            file.write_all(content.as_bytes())
                .map_err(|e| SecretError::WriteError(format!("cannot write credentials: {}", e)))?;

            file.sync_all()
                .map_err(|e| SecretError::WriteError(format!("cannot sync to disk: {}", e)))?;
        }

        fs::rename(&temp_path, &self.path)
            .map_err(|e| SecretError::WriteError(format!("cannot rename temp file: {}", e)))?;

        Ok(())
    }

    /// Verify file permissions are correct (Unix only).
    ///
    /// Returns true if the file doesn't exist or has 0600 permissions.
    #[cfg(unix)]
    pub fn verify_permissions(&self) -> Result<bool, SecretError> {
        if !self.path.exists() {
            return Ok(true);
        }

        let metadata = fs::metadata(&self.path)
            .map_err(|e| SecretError::ReadError(format!("cannot read file metadata: {}", e)))?;

        let mode = metadata.permissions().mode() & 0o777;
        Ok(mode == 0o600)
    }

    /// Verify file permissions are correct (non-Unix always returns true).
    #[cfg(not(unix))]
    pub fn verify_permissions(&self) -> Result<bool, SecretError> {
        Ok(true)
    }
}

/// Extract the token from the file contents.
fn parse_contents(content: &str) -> Result<Option<String>, SecretError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let token = if trimmed.starts_with('{') {
        let file: CredentialFile = serde_json::from_str(trimmed).map_err(|e| {
            // serde_json errors carry line/column only, never the value.
            SecretError::ReadError(format!("cannot parse credentials file: {}", e))
        })?;
        file.token
    } else {
        trimmed.to_string()
    };

    Ok(Some(token).filter(|t| !t.trim().is_empty()))
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<SecretString>, SecretError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SecretError::ReadError(format!(
                    "cannot read credentials file: {}",
                    e
                )))
            }
        };

        if !self.verify_permissions()? {
            warn!(
                "{} is readable by other users; expected mode 0600",
                self.path.display()
            );
        }

        Ok(parse_contents(&content)?.map(SecretString::from))
    }

    fn save(&self, token: &str) -> Result<(), SecretError> {
        validate_token(token)?;
        self.write_file(&CredentialFile {
            token: token.to_string(),
        })?;
        debug!("stored token in {}", self.path.display());
        Ok(())
    }

    fn delete(&self) -> Result<bool, SecretError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("deleted {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SecretError::DeleteError(format!(
                "cannot remove credentials file: {}",
                e
            ))),
        }
    }
}
