//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--repo` / `-r`: Repository to scan (`owner/name` or a GitHub URL)
//! - `--branch` / `-b`: Reference branch (default: the repository's default)
//! - `--verbose` / `-v`: Also show identical and inaccessible forks
//! - `--page` / `-p`: Page of 100 forks to scan, `-1` for all pages
//! - `--sort` / `-s`: Ranking key, unknown keys fall back to `ahead`
//! - `--json`: Print the report as JSON
//! - `--jobs` / `-j`: Forks compared at once
//! - `--timeout`: Overall time limit in seconds
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Results and errors only; implies --no-interactive
//! - `--no-interactive`: Never prompt
//! - `--deleteconfig`: Delete the stored token and exit

use std::io::IsTerminal;

use clap::Parser;

use crate::core::types::{RepoSlug, SortKey};
use crate::engine::Context;

/// forkscout - find the forks of a GitHub repository that are worth a look
#[derive(Parser, Debug)]
#[command(name = "forkscout")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    forkscout --repo octocat/hello-world
    forkscout --repo octocat/hello-world --branch develop --verbose
    forkscout --repo octocat/hello-world --page -1 --sort stars
    forkscout --deleteconfig")]
pub struct Cli {
    /// Repository to scan, as owner/name
    #[arg(
        short,
        long,
        value_name = "OWNER/NAME",
        value_parser = RepoSlug::parse,
        required_unless_present = "deleteconfig"
    )]
    pub repo: Option<RepoSlug>,

    /// Branch to compare forks against [default: the repository's default branch]
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Also show forks that are identical or could not be compared
    #[arg(short, long)]
    pub verbose: bool,

    /// Page of 100 forks to scan; -1 scans every page
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,

    /// Ranking key: stars, ahead, behind, lastUpdated, branches [default: ahead]
    #[arg(short, long, value_name = "KEY")]
    pub sort: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Number of forks compared at once
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Results and errors only; implies --no-interactive
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_interactive: bool,

    /// Delete the stored token and exit
    #[arg(long)]
    pub deleteconfig: bool,
}

impl Cli {
    /// Determine if interactive mode is enabled.
    ///
    /// Returns true unless `--no-interactive` or `--quiet` was set, or
    /// stdin is not a terminal.
    pub fn interactive(&self) -> bool {
        !self.no_interactive && !self.quiet && std::io::stdin().is_terminal()
    }

    /// The requested sort key, parsed leniently.
    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort.as_deref().map(SortKey::parse_lenient)
    }

    /// Build the run context from the flags.
    pub fn context(&self) -> Context {
        Context {
            debug: self.debug,
            quiet: self.quiet,
            interactive: self.interactive(),
            json: self.json,
        }
    }
}
