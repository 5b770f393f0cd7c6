//! secrets
//!
//! Storage for the access token.
//!
//! # Architecture
//!
//! The token is stored through the `CredentialStore` trait.
//! [`FileCredentialStore`] keeps it in `credentials.json` inside the
//! storage directory (see [`crate::core::paths`]).
//!
//! # Security
//!
//! - The token is **never** logged or included in error messages
//! - The file uses 0600 permissions on Unix (owner read/write only)
//! - All writes are atomic (temp file + rename)
//! - Tokens in memory are wrapped in [`secrecy::SecretString`]
//!
//! # Example
//!
//! ```ignore
//! use forkscout::secrets::{CredentialStore, FileCredentialStore};
//!
//! let store = FileCredentialStore::with_path(paths.credentials_file());
//!
//! store.save("ghp_xxxx...")?;
//! if let Some(token) = store.load()? {
//!     // Use token (never print it!)
//! }
//! store.delete()?;
//! ```

mod file_store;
mod traits;

pub use file_store::FileCredentialStore;
pub use traits::{validate_token, CredentialStore, SecretError};
