//! # tzp CLI entry point
//!
//! Parses command-line arguments, sets up logging and dispatches to the
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tzp_cli::config::Config;
use tzp_cli::generate::{run_generate, GenerateArgs};
use tzp_cli::inspect::{run_inspect, InspectArgs};
use tzp_cli::verify::{run_verify, VerifyArgs};

/// Time-zone provider table tool.
///
/// Compacts per-zone, per-locale display names and calendar conventions
/// into a deterministic binary table, and decodes and verifies such tables.
#[derive(Parser, Debug)]
#[command(name = "tzp", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a table from a catalog, or check an existing one.
    Generate(GenerateArgs),

    /// Decode a table and print its contents.
    Inspect(InspectArgs),

    /// Check a table against the catalog it was generated from.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG, when set, takes precedence over -v.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "tzp starting");

    let result = Config::load_optional(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Generate(args) => run_generate(args, &config),
        Commands::Inspect(args) => run_inspect(args),
        Commands::Verify(args) => run_verify(args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
