//! # dilemma CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dilemma_cli::commands::{
    run_appeal, run_cases, run_decide, run_login, run_ping, run_sentence, run_status, run_wait,
    DecideArgs, IdentityArgs, WaitArgs,
};
use dilemma_cli::play::{run_play, PlayArgs};

/// Client for the two-party dilemma case service.
#[derive(Parser, Debug)]
#[command(name = "dilemma", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Server base URL. Defaults to DILEMMA_API_URL, then http://127.0.0.1:8080.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the server is reachable.
    Ping,

    /// List all cases and their status.
    Cases,

    /// Check a case/party pair.
    Login(IdentityArgs),

    /// Submit the party's one decision.
    Decide(DecideArgs),

    /// Show whether the case has resolved.
    Status(IdentityArgs),

    /// Block until the case resolves.
    Wait(WaitArgs),

    /// Show the party's current sentence.
    Sentence(IdentityArgs),

    /// Request one appeal.
    Appeal(IdentityArgs),

    /// Full session: connect, log in, decide, wait, sentence, optional appeal.
    Play(PlayArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let client = match dilemma_cli::connect(cli.server.as_deref()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(1);
        }
    };

    let mut stdout = std::io::stdout();
    let out = &mut stdout;

    let result = match &cli.command {
        Commands::Ping => run_ping(&client, out).await,
        Commands::Cases => run_cases(&client, out).await,
        Commands::Login(id) => run_login(&client, (*id).into(), out).await,
        Commands::Decide(args) => run_decide(&client, args, out).await,
        Commands::Status(id) => run_status(&client, (*id).into(), out).await,
        Commands::Wait(args) => run_wait(&client, args, out).await,
        Commands::Sentence(id) => run_sentence(&client, (*id).into(), out).await,
        Commands::Appeal(id) => run_appeal(&client, (*id).into(), out).await,
        Commands::Play(args) => run_play(&client, args, out).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
