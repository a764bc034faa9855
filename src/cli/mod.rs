//! csv-health CLI
//!
//! Command-line interface: resolve the input path (argument or prompt),
//! run the diagnostic pipeline, print the report.

use std::{io, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

mod check;
mod prompt;

/// csv-health - Read-only diagnostic validation of CSV files
#[derive(Parser)]
#[command(name = "csv-health")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the CSV file (prompted for when omitted)
    path: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Report serialized as pretty-printed JSON
    Json,
}

/// Run the csv-health CLI.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.path {
        Some(path) => Ok(path),
        None => prompt::prompt_for_path(&mut io::stdin().lock(), &mut io::stderr()),
    }
    .and_then(|path| check::cmd_check(&path, cli.format));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout carries only the report.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
