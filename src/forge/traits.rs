//! forge::traits
//!
//! Forge trait definition for querying a repository's forks.
//!
//! # Design
//!
//! The `Forge` trait is async because forge operations involve network I/O.
//! All methods return `Result` so callers decide which failures are fatal:
//! repository lookups and fork listing abort the run, per-fork comparison
//! and branch counting only degrade that fork.
//!
//! # Example
//!
//! ```ignore
//! use forkscout::forge::{Forge, ForgeError};
//! use forkscout::core::types::RepoSlug;
//!
//! async fn count_forks(forge: &dyn Forge) -> Result<u64, ForgeError> {
//!     let slug = RepoSlug::parse("octocat/hello-world").unwrap();
//!     let info = forge.get_repository(&slug).await?;
//!     Ok(info.fork_count)
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::{Comparison, ForkRecord, RepoSlug, RepositoryInfo};

/// Errors from forge operations.
///
/// These error types map to common failure modes when interacting
/// with remote hosting services like GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForgeError {
    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// The Forge trait for querying forks on a remote hosting service.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so enrichment calls can run
/// concurrently against a shared forge.
///
/// # Error Handling
///
/// All methods return `Result<T, ForgeError>`. Callers should handle:
/// - `AuthFailed`: The stored credential is bad
/// - `NotFound`: Repository or fork doesn't exist (or is private)
/// - `RateLimited` / `ApiError` / `NetworkError`: Report and stop
#[async_trait]
pub trait Forge: Send + Sync {
    /// Get the forge name (e.g., "github").
    fn name(&self) -> &'static str;

    /// Fetch the reference repository's metadata.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the repository doesn't exist or isn't visible
    /// - `AuthFailed` if the token is rejected
    async fn get_repository(&self, repo: &RepoSlug) -> Result<RepositoryInfo, ForgeError>;

    /// Fetch one page of the repository's forks.
    ///
    /// Returned records carry name, URL, stars and last push; their
    /// comparison status is `Unknown` until [`Forge::compare`] fills it in.
    async fn list_forks(
        &self,
        repo: &RepoSlug,
        page: u64,
        per_page: u64,
    ) -> Result<Vec<ForkRecord>, ForgeError>;

    /// Compare `fork`'s `branch` against `base_owner:branch`.
    ///
    /// # Arguments
    ///
    /// * `fork` - Full name of the fork (`owner/repo`)
    /// * `base_owner` - Owner of the reference repository
    /// * `branch` - Branch compared on both sides
    async fn compare(
        &self,
        fork: &str,
        base_owner: &str,
        branch: &str,
    ) -> Result<Comparison, ForgeError>;

    /// Count the branches of `fork` (`owner/repo`).
    async fn branch_count(&self, fork: &str) -> Result<u64, ForgeError>;
}
