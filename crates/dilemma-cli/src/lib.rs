//! # dilemma-cli - Command-line front end
//!
//! Non-interactive access to a dilemma server. Every subcommand is one
//! remote call except `wait` and `play`:
//!
//! ```bash
//! dilemma ping
//! dilemma cases
//! dilemma decide --case 0 --party 1 BETRAY
//! dilemma wait --case 0 --party 1 --poll-interval 10
//! dilemma play --case 0 --party 0 COOPERATE --appeal
//! ```
//!
//! ## Exit codes
//!
//! - `0` - success.
//! - `1` - transport or server error.
//! - `2` - the server rejected the identity or the submission.

pub mod commands;
pub mod play;

use anyhow::{Context, Result};
use dilemma_client::DilemmaClient;

/// Exit code for a rejected identity or submission.
pub const EXIT_REJECTED: u8 = 2;

/// Build a client for `server`, or for `DILEMMA_API_URL` when absent.
pub fn connect(server: Option<&str>) -> Result<DilemmaClient> {
    let client = match server {
        Some(url) => DilemmaClient::connect(url),
        None => DilemmaClient::from_env(),
    }
    .context("cannot build client")?;
    tracing::debug!(server = %client.base_url(), "connecting");
    Ok(client)
}

/// Human-readable sentence line.
pub fn sentence_message(years: u32) -> String {
    if years == 0 {
        "You are free to go!".to_string()
    } else {
        format!("Your sentence is {years} years.")
    }
}
