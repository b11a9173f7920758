//! # taxcode CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taxcode_cli::check::{run_check, CheckArgs};
use taxcode_cli::decode::{run_decode, DecodeArgs};
use taxcode_cli::encode::{run_encode, EncodeArgs};
use taxcode_cli::{load_registry, EXIT_ERROR};

/// Italian tax code (codice fiscale) tool.
///
/// Computes tax codes from person data, decodes them back, and checks their
/// control character.
#[derive(Parser, Debug)]
#[command(name = "taxcode", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Semicolon-separated place file (name;province;code) to use instead of
    /// the bundled dataset.
    #[arg(long, global = true, value_name = "PATH")]
    places: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the tax code of a person.
    Encode(EncodeArgs),

    /// Recover person data from a tax code.
    Decode(DecodeArgs),

    /// Validate the format and control character of a tax code.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
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

    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::Check(args) => run_check(args, &mut stdout),
        Commands::Encode(args) => load_registry(cli.places.as_deref())
            .and_then(|registry| run_encode(args, registry, &mut stdout)),
        Commands::Decode(args) => load_registry(cli.places.as_deref())
            .and_then(|registry| run_decode(args, registry, &mut stdout)),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
