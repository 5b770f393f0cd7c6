//! forge
//!
//! Abstraction for the remote hosting service holding the forks.
//!
//! # Architecture
//!
//! The `Forge` trait defines the four remote calls the scan needs:
//! repository metadata, a page of forks, a fork's comparison against the
//! reference branch, and a fork's branch count. The engine only sees the
//! trait, so the pipeline runs unchanged against [`mock::MockForge`].
//!
//! # Modules
//!
//! - `traits`: Core `Forge` trait and `ForgeError`
//! - [`github`]: GitHub implementation using the REST API
//! - [`mock`]: Mock implementation for deterministic testing

pub mod github;
pub mod mock;
mod traits;

pub use github::GitHubForge;
pub use traits::*;
