//! csv-health - Read-only diagnostics for CSV files
//!
//! Loads a CSV file into an immutable in-memory snapshot and runs a fixed
//! sequence of checks over it: structure, data quality, descriptive
//! statistics and whitespace pollution. The file is never modified.
//!
//! # Design Principles
//!
//! 1. **Read-only** - Nothing is repaired, rewritten or persisted
//! 2. **Fail fast at load** - A file that cannot be loaded aborts the run
//!    before any check executes
//! 3. **Checks never fail** - Degenerate data becomes a finding, not an error
//! 4. **Arrow inside** - Parsing and type inference via `arrow-csv`
//!
//! # Quick Start
//!
//! ```no_run
//! use csv_health::DiagnosticPipeline;
//!
//! let report = DiagnosticPipeline::new().diagnose("data/orders.csv")?;
//! println!("{} rows, {} columns", report.row_count, report.column_count);
//! for finding in report.warnings() {
//!     println!("{finding}");
//! }
//! # Ok::<(), csv_health::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        clippy::too_many_lines
    )
)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]

/// CLI module for command-line interface
#[cfg(feature = "cli")]
pub mod cli;
pub mod dataset;
pub mod diagnostics;
pub mod error;
pub mod loader;

pub use dataset::{Column, ColumnKind, CsvDataset};
pub use diagnostics::{
    Category, DiagnosticConfig, DiagnosticPipeline, Finding, Report, Severity,
};
pub use error::{Error, Result};
pub use loader::load;
