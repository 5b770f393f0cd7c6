//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Status lines and verbosity handling
//! - [`table`] - Plain ASCII tables
//! - [`report`] - Text and JSON rendering of a finished scan
//! - [`progress`] - Terminal reporting while a scan runs
//! - [`prompts`] - Interactive prompts and confirmations
//!
//! # Design
//!
//! All output and prompts go through this module to ensure consistent
//! formatting and proper handling of interactive vs non-interactive modes.

pub mod output;
pub mod progress;
pub mod prompts;
pub mod report;
pub mod table;
