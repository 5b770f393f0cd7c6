//! cli
//!
//! Command-line interface layer for forkscout.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and map usage errors to exit codes
//! - Set up logging, configuration, and the access token
//! - Run the scan on a tokio runtime and render the result
//!
//! # Exit codes
//!
//! - `0`: scan completed, `--deleteconfig` succeeded, `--help`, `--version`
//! - `1`: everything else (usage error, repository not found, rejected
//!   token, no forks, timeout, remote failure)

pub mod args;
pub mod auth;

pub use args::Cli;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::error::ErrorKind;
use clap::Parser;

use crate::core::config::{Config, MAX_CONCURRENCY};
use crate::core::paths::ForkscoutPaths;
use crate::engine::scan::{scan_with_timeout, ScanError, ScanRequest};
use crate::engine::Context;
use crate::forge::GitHubForge;
use crate::secrets::{CredentialStore, FileCredentialStore};
use crate::ui::output::{self, Marker};
use crate::ui::progress::TerminalProgress;
use crate::ui::report;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Printing only fails if stdout/stderr are gone.
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_logging(cli.debug);
    let ctx = cli.context();

    match execute(&cli, &ctx) {
        Ok(code) => code,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

/// Route `log` output to stderr. `RUST_LOG` overrides the flag.
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

fn execute(cli: &Cli, ctx: &Context) -> Result<ExitCode> {
    let verbosity = ctx.verbosity();
    let paths = ForkscoutPaths::discover()?;
    let store = FileCredentialStore::with_path(paths.credentials_file());

    if cli.deleteconfig {
        if store.delete().context("Failed to delete stored token")? {
            output::status(Marker::Success, "Token deleted", verbosity);
        } else {
            output::status(Marker::Notice, "No stored token to delete", verbosity);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load(&paths)?;
    let repo = cli
        .repo
        .clone()
        .context("a repository is required (--repo owner/name)")?;

    let resolved = auth::resolve_token(ctx, &store, std::env::var(auth::TOKEN_ENV).ok())?;
    let source = resolved.source;
    let forge = GitHubForge::with_options(resolved.token, config.api_base(), config.request_timeout())?;

    let concurrency = cli
        .jobs
        .map(usize::from)
        .unwrap_or_else(|| config.concurrency())
        .clamp(1, MAX_CONCURRENCY);
    let timeout = cli
        .timeout
        .map(std::time::Duration::from_secs)
        .unwrap_or_else(|| config.timeout());

    let mut request = ScanRequest::new(repo.clone())
        .with_page(cli.page)
        .with_sort(cli.sort_key().unwrap_or_else(|| config.default_sort()))
        .with_concurrency(concurrency);
    if let Some(branch) = &cli.branch {
        request = request.with_branch(branch.clone());
    }
    log::debug!(
        "scan of {} sorted by {} with {} jobs, timeout {:?}",
        repo,
        request.sort,
        concurrency,
        timeout
    );

    output::status(Marker::Working, format!("Looking for {}", repo), verbosity);
    let progress = TerminalProgress::new(verbosity, ctx.shows_progress());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let result = runtime.block_on(scan_with_timeout(&forge, &request, &progress, timeout));
    progress.finish();

    match result {
        Ok(report) => {
            if ctx.json {
                println!("{}", report::render_json(&report)?);
            } else {
                print!("{}", report::render_text(&report, cli.verbose));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(ScanError::NotFound(_)) => {
            output::error("Repository not found");
            Ok(ExitCode::FAILURE)
        }
        Err(ScanError::Unauthorized(message)) => {
            log::debug!("token rejected: {}", message);
            auth::handle_rejected_token(ctx, &store, source)?;
            Ok(ExitCode::FAILURE)
        }
        Err(ScanError::NoForksFound(_)) => {
            output::error("No forks found");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            output::error(err);
            Ok(ExitCode::FAILURE)
        }
    }
}
