//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Status lines carry a one-character marker (`[+]`, `[✓]`, `[X]`, `[!]`,
//! `[~]`) and respect the quiet flag. Errors are always shown, on stderr.
//! When `--json` is enabled the CLI runs quiet so stdout stays parseable.

use std::fmt::{self, Display};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - errors and results only
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    pub fn is_quiet(&self) -> bool {
        *self == Verbosity::Quiet
    }
}

/// Leading marker of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Work in progress.
    Working,
    Success,
    Failure,
    Warning,
    /// Informational, nothing went wrong.
    Notice,
}

impl Marker {
    pub fn symbol(&self) -> &'static str {
        match self {
            Marker::Working => "[+]",
            Marker::Success => "[✓]",
            Marker::Failure => "[X]",
            Marker::Warning => "[!]",
            Marker::Notice => "[~]",
        }
    }
}

impl Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Format a status line.
pub fn format_status(marker: Marker, message: impl Display) -> String {
    format!("{} {}", marker, message)
}

/// Print a status line (respects quiet mode).
pub fn status(marker: Marker, message: impl Display, verbosity: Verbosity) {
    if !verbosity.is_quiet() {
        println!("{}", format_status(marker, message));
    }
}

/// Print a warning (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    status(Marker::Warning, message, verbosity);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("{}", format_status(Marker::Failure, message));
}

/// Render `owner:branch`, the reference every fork is compared against.
pub fn format_reference(owner: &str, branch: &str) -> String {
    format!("{}:{}", owner, branch)
}
