//! # Play Flow
//!
//! The whole client session in one command: connection check, login,
//! decision, wait for the other party, sentence, optional appeal.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use dilemma_client::DilemmaClient;
use dilemma_core::{Decision, Identity};

use crate::commands::{IdentityArgs, PollArgs};
use crate::{sentence_message, EXIT_REJECTED};

/// Arguments for `dilemma play`.
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,
    /// BETRAY or COOPERATE (case-insensitive).
    pub decision: Decision,
    /// Request one appeal after the sentence is known.
    #[arg(long)]
    pub appeal: bool,
    #[command(flatten)]
    pub poll: PollArgs,
}

/// Run the full session.
pub async fn run_play(
    client: &DilemmaClient,
    args: &PlayArgs,
    out: &mut (dyn Write + Send),
) -> Result<u8> {
    let identity: Identity = args.identity.into();

    let greeting = client
        .ping()
        .await
        .with_context(|| format!("cannot reach server at {}", client.base_url()))?;
    writeln!(out, "Connected: {greeting}")?;

    if !client.authenticate(identity).await? {
        writeln!(out, "Invalid login: {identity}.")?;
        return Ok(EXIT_REJECTED);
    }

    let submitted = client.submit_decision(identity, args.decision).await?;
    if submitted.processed {
        writeln!(out, "Decision {} recorded.", args.decision)?;
    } else if submitted.already_decided() {
        writeln!(out, "Your decision was already on record.")?;
    } else {
        let reason = submitted.reason.as_deref().unwrap_or("unknown");
        writeln!(out, "Decision not processed: {reason}.")?;
        return Ok(EXIT_REJECTED);
    }

    if !client.poll_resolved(identity).await? {
        writeln!(out, "Waiting for the other party...")?;
        client
            .wait_for_resolution(identity, args.poll.interval(), args.poll.limit())
            .await?;
    }

    let years = client.fetch_sentence(identity).await?;
    writeln!(out, "{}", sentence_message(years))?;

    if args.appeal {
        let appeal = client.request_appeal(identity).await?;
        tracing::info!(accepted = appeal.accepted, "appeal decided");
        writeln!(out, "{}", appeal.message)?;
    }

    Ok(0)
}
