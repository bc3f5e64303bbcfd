//! # kyc CLI entry point
//!
//! Parses command-line arguments, installs logging on stderr, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kyc_cli::fraud::{run_fraud, FraudArgs};
use kyc_cli::identity::{run_identity, IdentityArgs};
use kyc_cli::screen::{run_screen, ScreenArgs};

/// KYC signal engine.
///
/// Extracts identity signals from document fields and MRZ text, and
/// fraud signals from transaction feeds.
#[derive(Parser, Debug)]
#[command(name = "kyc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Fraud detector configuration (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Identity signal for one document.
    Identity(IdentityArgs),

    /// Fraud signals for a transaction feed.
    Fraud(FraudArgs),

    /// Identity and fraud signals for a KYC start request.
    Screen(ScreenArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "kyc CLI starting");

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Identity(args) => run_identity(args),
        Commands::Fraud(args) => run_fraud(args, config),
        Commands::Screen(args) => run_screen(args, config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::new(verbosity_filter(verbose));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
