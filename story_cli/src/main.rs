//! Story CLI
//!
//! Command line tools for Nightfall story content.
//!
//! # Commands
//!
//! - `check`: validate a story file and report its shape
//! - `play`: play a story interactively on stdin
//! - `replay`: run a fixed list of choices and print the resulting snapshot

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;

pub use error::{CliError, CliExitCode};

#[derive(Parser)]
#[command(name = "story")]
#[command(version)]
#[command(about = "Check, play and replay Nightfall story graphs")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a story file and print its node and edge counts
    Check(commands::check::CheckArgs),
    /// Play a story interactively
    Play(commands::play::PlayArgs),
    /// Follow a list of choices and print the final snapshot as JSON
    Replay(commands::replay::ReplayArgs),
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => commands::check::run(args),
        Commands::Play(args) => commands::play::run(args),
        Commands::Replay(args) => commands::replay::run(args),
    };

    let exit_code = match result {
        Ok(()) => CliExitCode::Success,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {}", err);
            CliExitCode::from(&err)
        }
    };

    std::process::exit(exit_code.into());
}
