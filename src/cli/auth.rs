//! cli::auth
//!
//! Token resolution for a run.
//!
//! # Sources
//!
//! In order of precedence:
//! 1. `FORKSCOUT_TOKEN` (used for this run only, never stored)
//! 2. The credential store
//! 3. An interactive masked prompt, saved to the credential store
//!
//! # Security
//!
//! This module NEVER prints the token value. It only confirms success/failure.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context as _, Result};
use secrecy::SecretString;

use crate::engine::Context;
use crate::secrets::{validate_token, CredentialStore};
use crate::ui::output::{self, Marker};
use crate::ui::prompts;

/// Environment variable carrying a token for this run.
pub const TOKEN_ENV: &str = "FORKSCOUT_TOKEN";

const TOKEN_PROMPT: &str =
    "Please provide a personal access token (no scope required; https://github.com/settings/tokens): ";

/// Where the run's token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    Stored,
    Prompted,
}

impl TokenSource {
    /// Whether a rejected token can be removed from the credential store.
    pub fn is_stored(&self) -> bool {
        !matches!(self, TokenSource::Environment)
    }
}

/// A token ready for use.
pub struct ResolvedToken {
    pub token: SecretString,
    pub source: TokenSource,
}

impl std::fmt::Debug for ResolvedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedToken")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Find the token for this run.
///
/// `env_token` is the value of [`TOKEN_ENV`], if set.
pub fn resolve_token(
    ctx: &Context,
    store: &dyn CredentialStore,
    env_token: Option<String>,
) -> Result<ResolvedToken> {
    if let Some(token) = env_token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        log::debug!("using token from {}", TOKEN_ENV);
        return Ok(ResolvedToken {
            token: SecretString::from(token),
            source: TokenSource::Environment,
        });
    }

    if let Some(token) = store.load().context("Failed to read stored token")? {
        return Ok(ResolvedToken {
            token,
            source: TokenSource::Stored,
        });
    }

    if !ctx.interactive {
        bail!(
            "No token stored. Set {} or run interactively to store one.",
            TOKEN_ENV
        );
    }

    let token = prompts::password(TOKEN_PROMPT, ctx.interactive).context("Failed to read token")?;
    validate_token(&token)?;
    store.save(&token).context("Failed to store token")?;
    output::status(Marker::Success, "Token saved", ctx.verbosity());

    Ok(ResolvedToken {
        token: SecretString::from(token),
        source: TokenSource::Prompted,
    })
}

/// Offer to delete a token the remote rejected.
///
/// Returns whether the stored token was deleted. Environment tokens are
/// never touched, and nothing is asked in non-interactive mode.
pub fn handle_rejected_token(
    ctx: &Context,
    store: &dyn CredentialStore,
    source: TokenSource,
) -> Result<bool> {
    let stdin = io::stdin();
    handle_rejected_token_with(ctx, store, source, &mut stdin.lock(), &mut io::stdout())
}

/// [`handle_rejected_token`] reading the answer from `input`.
pub fn handle_rejected_token_with<R, W>(
    ctx: &Context,
    store: &dyn CredentialStore,
    source: TokenSource,
    input: &mut R,
    prompt_output: &mut W,
) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    if !source.is_stored() {
        output::error(format!("Incorrect token provided in {}", TOKEN_ENV));
        return Ok(false);
    }

    if !ctx.interactive {
        output::error("Incorrect token provided, run with --deleteconfig to remove it");
        return Ok(false);
    }

    let delete = prompts::confirm_with(
        input,
        prompt_output,
        &output::format_status(
            Marker::Failure,
            "Incorrect token, do you want to delete the stored token?",
        ),
        false,
    )
    .context("Failed to read answer")?;

    if delete {
        store.delete().context("Failed to delete stored token")?;
        output::status(Marker::Success, "Token deleted", ctx.verbosity());
    } else {
        output::error("Incorrect token provided, exiting");
    }
    Ok(delete)
}
