//! # Single-call Subcommands
//!
//! Each `run_*` function writes its result to `out` and returns the process
//! exit code.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use dilemma_client::DilemmaClient;
use dilemma_core::{Decision, Identity};

use crate::{sentence_message, EXIT_REJECTED};

/// `--case` and `--party` flags.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityArgs {
    /// Case identifier.
    #[arg(long = "case")]
    pub case_id: i64,
    /// Party index within the case (0 or 1).
    #[arg(long = "party")]
    pub party_index: i64,
}

impl From<IdentityArgs> for Identity {
    fn from(args: IdentityArgs) -> Self {
        Identity::new(args.case_id, args.party_index)
    }
}

/// Arguments for `dilemma decide`.
#[derive(Args, Debug, Clone)]
pub struct DecideArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,
    /// BETRAY or COOPERATE (case-insensitive).
    pub decision: Decision,
}

/// Polling flags shared by `wait` and `play`.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollArgs {
    /// Seconds between resolution polls (at least 1).
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval: u64,
    /// Give up after this many seconds. Waits indefinitely when absent.
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl PollArgs {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    pub fn limit(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Arguments for `dilemma wait`.
#[derive(Args, Debug, Clone, Copy)]
pub struct WaitArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,
    #[command(flatten)]
    pub poll: PollArgs,
}

pub async fn run_ping(client: &DilemmaClient, out: &mut (dyn Write + Send)) -> Result<u8> {
    let message = client.ping().await?;
    writeln!(out, "{message}")?;
    Ok(0)
}

pub async fn run_cases(client: &DilemmaClient, out: &mut (dyn Write + Send)) -> Result<u8> {
    for case in client.list_cases().await? {
        writeln!(
            out,
            "case {}\t{}\t{}/2 decided",
            case.case_id, case.status, case.decided_parties
        )?;
    }
    Ok(0)
}

pub async fn run_login(
    client: &DilemmaClient,
    identity: Identity,
    out: &mut (dyn Write + Send),
) -> Result<u8> {
    if client.authenticate(identity).await? {
        writeln!(out, "Logged in as {identity}.")?;
        Ok(0)
    } else {
        writeln!(out, "Invalid login: {identity}.")?;
        Ok(EXIT_REJECTED)
    }
}

pub async fn run_decide(
    client: &DilemmaClient,
    args: &DecideArgs,
    out: &mut (dyn Write + Send),
) -> Result<u8> {
    let result = client
        .submit_decision(args.identity.into(), args.decision)
        .await?;
    if result.processed {
        writeln!(out, "Decision {} recorded.", args.decision)?;
        Ok(0)
    } else {
        let reason = result.reason.as_deref().unwrap_or("unknown");
        writeln!(out, "Decision not processed: {reason}.")?;
        Ok(EXIT_REJECTED)
    }
}

pub async fn run_status(
    client: &DilemmaClient,
    identity: Identity,
    out: &mut (dyn Write + Send),
) -> Result<u8> {
    if client.poll_resolved(identity).await? {
        writeln!(out, "Resolved.")?;
    } else {
        writeln!(out, "Waiting for the other party.")?;
    }
    Ok(0)
}

pub async fn run_wait(
    client: &DilemmaClient,
    args: &WaitArgs,
    out: &mut (dyn Write + Send),
) -> Result<u8> {
    client
        .wait_for_resolution(args.identity.into(), args.poll.interval(), args.poll.limit())
        .await?;
    writeln!(out, "Resolved.")?;
    Ok(0)
}

pub async fn run_sentence(
    client: &DilemmaClient,
    identity: Identity,
    out: &mut (dyn Write + Send),
) -> Result<u8> {
    match client.fetch_sentence(identity).await {
        Ok(years) => {
            writeln!(out, "{}", sentence_message(years))?;
            Ok(0)
        }
        Err(e) if e.is_unauthorized() => {
            writeln!(out, "Invalid login: {identity}.")?;
            Ok(EXIT_REJECTED)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn run_appeal(
    client: &DilemmaClient,
    identity: Identity,
    out: &mut (dyn Write + Send),
) -> Result<u8> {
    let result = client.request_appeal(identity).await?;
    writeln!(out, "{}", result.message)?;
    Ok(0)
}
