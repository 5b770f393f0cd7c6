//! secrets::traits
//!
//! Credential storage trait definition.
//!
//! # Design
//!
//! forkscout stores exactly one secret: the access token sent with every
//! API request. The `CredentialStore` trait loads, saves, and deletes it.
//!
//! # Security
//!
//! Implementations MUST:
//! - Never log, print, or include the token in error messages
//! - Use secure storage mechanisms appropriate to the platform
//! - Be thread-safe (Send + Sync)

use secrecy::SecretString;
use thiserror::Error;

/// Errors from credential storage operations.
///
/// Note: Error messages intentionally do not include the token.
#[derive(Debug, Error)]
pub enum SecretError {
    /// Failed to read from credential storage.
    #[error("failed to read credentials: {0}")]
    ReadError(String),

    /// Failed to write to credential storage.
    #[error("failed to write credentials: {0}")]
    WriteError(String),

    /// Failed to delete from credential storage.
    #[error("failed to delete credentials: {0}")]
    DeleteError(String),

    /// The token was rejected before storing.
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

/// Trait for credential storage providers.
pub trait CredentialStore: Send + Sync {
    /// Load the stored token.
    ///
    /// Returns `Ok(None)` if no token is stored.
    ///
    /// # Security
    ///
    /// The returned value is the raw secret. Do not log or print it.
    fn load(&self) -> Result<Option<SecretString>, SecretError>;

    /// Store a token, replacing any existing one.
    fn save(&self, token: &str) -> Result<(), SecretError>;

    /// Delete the stored token.
    ///
    /// Returns `Ok(true)` if something was deleted, `Ok(false)` if nothing
    /// was stored. Deleting is idempotent.
    fn delete(&self) -> Result<bool, SecretError>;

    /// Check if a token is stored.
    ///
    /// Default implementation uses `load()` and checks for `Some`.
    fn exists(&self) -> Result<bool, SecretError> {
        Ok(self.load()?.is_some())
    }
}

/// Basic sanity checks for a token before it is stored.
///
/// We don't validate the token against the API here; a bad token is
/// caught by the first request.
pub fn validate_token(token: &str) -> Result<(), SecretError> {
    if token.is_empty() {
        return Err(SecretError::InvalidToken("token cannot be empty".into()));
    }

    if token.chars().any(char::is_whitespace) {
        return Err(SecretError::InvalidToken(
            "token should not contain whitespace".into(),
        ));
    }

    Ok(())
}
