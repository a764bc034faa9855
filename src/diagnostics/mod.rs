//! CSV diagnostics
//!
//! A fixed, linear sequence of read-only checks over a [`CsvDataset`]:
//!
//! 1. **Structural** - header validity, duplicate column names, dimensions
//! 2. **Quality** - empty rows, empty columns, duplicate rows, missing values
//! 3. **Statistics** - descriptive statistics for every column
//! 4. **Whitespace** - pollution ratio of textual columns (> 10% is flagged)
//!
//! Each check contributes [`Finding`]s; the report groups them by
//! [`Category`] and keeps check order within a category.
//!
//! # Example
//!
//! ```no_run
//! use csv_health::diagnostics::DiagnosticPipeline;
//!
//! let report = DiagnosticPipeline::new().diagnose("data/customers.csv")?;
//! for finding in report.warnings() {
//!     println!("{finding}");
//! }
//! # Ok::<(), csv_health::Error>(())
//! ```
//!
//! [`CsvDataset`]: crate::CsvDataset

// Statistical computation
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::unused_self)]

mod checks;
mod findings;
mod pipeline;
mod report;
mod stats;
mod structural;
mod whitespace;


pub use checks::{QualityChecker, QualitySummary};
pub use findings::{Category, Finding, Severity};
pub use pipeline::{DiagnosticConfig, DiagnosticPipeline};
pub use report::{assemble_findings, ColumnSummary, Report};
pub use stats::{
    CategoricalStats, ColumnProfile, ColumnStatistics, NumericStats, StatisticsGenerator,
};
pub use structural::StructuralChecker;
pub use whitespace::{WhitespaceChecker, WhitespaceRatio, DEFAULT_WHITESPACE_THRESHOLD};
