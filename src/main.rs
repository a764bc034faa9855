//! csv-health CLI - Read-only diagnostic validation of CSV files
//!
//! Command-line entry point; all logic lives in [`csv_health::cli`].

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::process::ExitCode;

fn main() -> ExitCode {
    csv_health::cli::run()
}
