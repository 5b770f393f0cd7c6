//! core
//!
//! Core domain types and the fork classification pipeline.
//!
//! # Modules
//!
//! - [`types`] - Strong types: RepoSlug, ForkRecord, ComparisonStatus, SortKey
//! - [`classify`] - Partition forks into status buckets
//! - [`rank`] - Order buckets by the active sort key
//! - [`pagination`] - Turn a fork count and page request into pages to fetch
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for forkscout storage
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Classification, ranking and pagination are pure and deterministic
//! - No network or terminal access in this layer

pub mod classify;
pub mod config;
pub mod pagination;
pub mod paths;
pub mod rank;
pub mod types;
