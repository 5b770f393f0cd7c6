//! forkscout - find the forks of a GitHub repository that are worth a look
//!
//! forkscout lists the forks of a repository, compares each fork's branch
//! with the reference branch, and groups the forks into ahead, behind,
//! diverged, identical, and inaccessible ones, each group ranked by a
//! selectable key.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, runs a scan, renders it)
//! - [`engine`] - The scan pipeline: lookup, paging, enrichment, classification
//! - [`core`] - Domain types, classification, ranking, pagination, configuration
//! - [`forge`] - Abstraction for the remote hosting service (GitHub)
//! - [`secrets`] - Access token storage
//! - [`ui`] - Output, tables, progress, and prompts
//!
//! # Invariants
//!
//! 1. Every listed fork lands in exactly one bucket
//! 2. Ranking is stable, so identical input renders identically
//! 3. A fork that cannot be compared degrades to `unknown`, never aborts the run
//! 4. The token is never printed or logged

pub mod cli;
pub mod core;
pub mod engine;
pub mod forge;
pub mod secrets;
pub mod ui;
