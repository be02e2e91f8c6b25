//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary should execute,
//! currently only starting the API server.

use crate::cli::actions::Action;
use crate::cli::commands::{ARG_DATA_DIR, ARG_FRONTEND_URL, ARG_PORT, ARG_SESSION_TTL};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);

    let data_dir = matches
        .get_one::<PathBuf>(ARG_DATA_DIR)
        .cloned()
        .context("missing required argument: --data-dir")?;

    let frontend_url = matches
        .get_one::<String>(ARG_FRONTEND_URL)
        .cloned()
        .context("missing required argument: --frontend-url")?;

    let session_ttl_seconds = matches
        .get_one::<u64>(ARG_SESSION_TTL)
        .copied()
        .unwrap_or(86400);

    Ok(Action::Server {
        port,
        data_dir,
        frontend_url,
        session_ttl_seconds,
    })
}
