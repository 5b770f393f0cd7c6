//! engine
//!
//! Runs one scan of a repository's forks.
//!
//! # Architecture
//!
//! The engine holds no global state. Everything a run needs is passed in
//! explicitly: the [`Context`] carries the flags that shape output and
//! interaction, the [`scan::ScanRequest`] says what to scan, and the forge
//! is handed over by reference.
//!
//! ```text
//! Context + ScanRequest + &dyn Forge -> scan -> ScanReport
//! ```
//!
//! # Example
//!
//! ```ignore
//! use forkscout::engine::scan::{scan_with_timeout, ScanRequest};
//!
//! let request = ScanRequest::new(slug).with_sort(SortKey::Stars);
//! let report = scan_with_timeout(&forge, &request, &progress, config.timeout()).await?;
//! ```

pub mod scan;

pub use scan::{scan, scan_with_timeout, NoopObserver, ScanError, ScanObserver, ScanReport, ScanRequest};

use crate::ui::output::Verbosity;

/// Execution context for a run.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (results and errors only).
    pub quiet: bool,
    /// Interactive mode enabled (prompts allowed).
    pub interactive: bool,
    /// Machine-readable output on stdout.
    pub json: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            debug: false,
            quiet: false,
            interactive: true,
            json: false,
        }
    }
}

impl Context {
    /// Verbosity of status output. JSON mode keeps stdout for the report.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet || self.json, self.debug)
    }

    /// Whether the comparison counter is drawn.
    pub fn shows_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_interactive() {
        let ctx = Context::default();
        assert!(ctx.interactive);
        assert_eq!(ctx.verbosity(), Verbosity::Normal);
        assert!(ctx.shows_progress());
    }

    #[test]
    fn json_silences_status() {
        let ctx = Context {
            json: true,
            ..Context::default()
        };
        assert_eq!(ctx.verbosity(), Verbosity::Quiet);
        assert!(!ctx.shows_progress());
    }

    #[test]
    fn debug_unless_quiet() {
        let ctx = Context {
            debug: true,
            ..Context::default()
        };
        assert_eq!(ctx.verbosity(), Verbosity::Debug);

        let ctx = Context {
            debug: true,
            quiet: true,
            ..Context::default()
        };
        assert_eq!(ctx.verbosity(), Verbosity::Quiet);
    }
}
