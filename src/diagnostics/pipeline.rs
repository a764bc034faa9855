//! The diagnostic pipeline: structural checks, quality checks, statistics,
//! whitespace check, report assembly.

use std::path::Path;

use tracing::{debug, info};

use super::{
    checks::QualityChecker,
    report::{assemble_findings, ColumnSummary, Report},
    stats::StatisticsGenerator,
    structural::StructuralChecker,
    whitespace::{WhitespaceChecker, DEFAULT_WHITESPACE_THRESHOLD},
};
use crate::{
    dataset::CsvDataset,
    error::{Error, Result},
    loader,
};

/// Settings for a diagnostic run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagnosticConfig {
    /// Pollution ratio above which a textual column is flagged (default: 0.10)
    pub whitespace_threshold: f64,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            whitespace_threshold: DEFAULT_WHITESPACE_THRESHOLD,
        }
    }
}

impl DiagnosticConfig {
    /// Set the whitespace threshold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] unless `threshold` is within `[0, 1]`.
    pub fn with_whitespace_threshold(mut self, threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::invalid_config(format!(
                "whitespace threshold must be within [0, 1], got {threshold}"
            )));
        }
        self.whitespace_threshold = threshold;
        Ok(self)
    }
}

/// Runs every check over a dataset and assembles a [`Report`].
///
/// # Example
///
/// ```
/// use csv_health::{CsvDataset, DiagnosticPipeline};
///
/// let dataset = CsvDataset::from_csv_str("a,a,b\n1,2,3\n").unwrap();
/// let report = DiagnosticPipeline::new().run(&dataset);
/// assert!(report
///     .findings
///     .iter()
///     .any(|f| f.message == "duplicate column: a (2 occurrences)"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagnosticPipeline {
    config: DiagnosticConfig,
}

impl DiagnosticPipeline {
    /// Create a pipeline with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with an explicit configuration
    pub fn with_config(config: DiagnosticConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &DiagnosticConfig {
        &self.config
    }

    /// Run all checks. Never fails: degenerate columns show up as findings.
    pub fn run(&self, dataset: &CsvDataset) -> Report {
        debug!(
            rows = dataset.len(),
            columns = dataset.column_count(),
            "starting diagnostic run"
        );

        let mut findings = StructuralChecker::new().check(dataset);

        let (quality, quality_findings) = QualityChecker::new().check(dataset);
        findings.extend(quality_findings);

        let (statistics, stats_findings) = StatisticsGenerator::new().generate(dataset);
        findings.extend(stats_findings);

        let (whitespace, whitespace_findings) =
            WhitespaceChecker::new(self.config.whitespace_threshold).check(dataset);
        findings.extend(whitespace_findings);

        let report = Report {
            source: dataset.source().map(|p| p.display().to_string()),
            row_count: dataset.len(),
            column_count: dataset.column_count(),
            columns: dataset.columns().iter().map(ColumnSummary::from).collect(),
            findings: assemble_findings(findings),
            quality,
            statistics,
            whitespace,
        };

        for finding in report.warnings() {
            debug!(
                category = %finding.category,
                column = finding.column.as_deref(),
                "{}",
                finding.message
            );
        }
        info!(
            findings = report.findings.len(),
            warnings = report.warning_count(),
            "diagnostic run complete"
        );
        report
    }

    /// Load a file and run all checks on it.
    ///
    /// # Errors
    ///
    /// Returns the loader's error if the file cannot be loaded; no partial
    /// report is produced.
    pub fn diagnose(&self, path: impl AsRef<Path>) -> Result<Report> {
        let dataset = loader::load(path)?;
        Ok(self.run(&dataset))
    }
}
