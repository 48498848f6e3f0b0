//! Binary entry point for rapport.
//!
//! Simulates the `/interactions` slash command locally against the SQLite
//! record store.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow printing in the main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use rapport::observability;
use rapport::rendering::failure_message;
use rapport::{cli, RapportConfig};
use std::process::ExitCode;

/// Rapport - track your interactions with people.
#[derive(Parser)]
#[command(name = "rapport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the SQLite database (overrides RAPPORT_DB).
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Run one slash-command text as a given user.
    Run {
        /// The platform user id of the rater (the leading `@` is optional).
        #[arg(short, long, env = "RAPPORT_USER")]
        user: String,

        /// The slash-command text; empty lists the recent log.
        #[arg(default_value = "")]
        text: String,
    },
}

fn main() -> ExitCode {
    // Load .env if present; missing files are fine.
    let _ = dotenvy::dotenv();

    let args = Cli::parse();

    if let Err(e) = observability::init_logging(args.verbose) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let config = match args.db {
        Some(path) => RapportConfig::with_db_path(path),
        None => match RapportConfig::from_env() {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "failed to resolve configuration");
                return ExitCode::FAILURE;
            },
        },
    };

    match args.command {
        Commands::Run { user, text } => match cli::run(&config, &user, &text) {
            Ok(payload) => {
                match serde_json::to_string_pretty(&payload) {
                    Ok(rendered) => println!("{rendered}"),
                    Err(e) => {
                        tracing::error!(error = %e, "failed to serialize payload");
                        return ExitCode::FAILURE;
                    },
                }
                ExitCode::SUCCESS
            },
            Err(e) => {
                tracing::error!(error = %e, "command failed");
                if let Ok(rendered) = serde_json::to_string_pretty(&failure_message()) {
                    println!("{rendered}");
                }
                ExitCode::FAILURE
            },
        },
    }
}
