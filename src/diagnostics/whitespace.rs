//! Whitespace pollution in textual columns.

use serde::Serialize;
use tracing::debug;

use super::findings::{Category, Finding};
use crate::dataset::{Column, ColumnKind, CsvDataset};

/// Default pollution ratio above which a column is flagged.
pub const DEFAULT_WHITESPACE_THRESHOLD: f64 = 0.10;

/// Pollution measured for one textual column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhitespaceRatio {
    /// Column name
    pub column: String,
    /// Non-missing values with leading or trailing whitespace
    pub polluted: usize,
    /// Non-missing values
    pub present: usize,
    /// `polluted / present`, 0 when `present` is 0
    pub ratio: f64,
}

impl WhitespaceRatio {
    /// Measure a column. Missing values are ignored.
    pub fn measure(column: &Column) -> Self {
        let mut polluted = 0;
        let mut present = 0;
        for value in column.present_values() {
            present += 1;
            if value.trim() != value {
                polluted += 1;
            }
        }

        let ratio = if present == 0 {
            0.0
        } else {
            polluted as f64 / present as f64
        };

        Self {
            column: column.name().to_string(),
            polluted,
            present,
            ratio,
        }
    }
}

/// Flags textual columns whose pollution ratio exceeds a threshold.
#[derive(Debug, Clone, Copy)]
pub struct WhitespaceChecker {
    threshold: f64,
}

impl Default for WhitespaceChecker {
    fn default() -> Self {
        Self::new(DEFAULT_WHITESPACE_THRESHOLD)
    }
}

impl WhitespaceChecker {
    /// Create a checker with the given threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Configured threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Measure every textual column. A finding is emitted only when the
    /// ratio is strictly greater than the threshold.
    pub fn check(&self, dataset: &CsvDataset) -> (Vec<WhitespaceRatio>, Vec<Finding>) {
        let ratios: Vec<WhitespaceRatio> = dataset
            .columns()
            .iter()
            .filter(|c| c.kind() == ColumnKind::Textual)
            .map(WhitespaceRatio::measure)
            .collect();

        let findings: Vec<Finding> = ratios
            .iter()
            .filter(|r| r.present > 0 && r.ratio > self.threshold)
            .map(|r| {
                Finding::warning(
                    Category::Whitespace,
                    format!(
                        "column '{}': {:.1}% of values have leading/trailing whitespace ({} of {})",
                        r.column,
                        r.ratio * 100.0,
                        r.polluted,
                        r.present
                    ),
                )
                .for_column(r.column.clone())
            })
            .collect();

        debug!(
            textual_columns = ratios.len(),
            flagged = findings.len(),
            threshold = self.threshold,
            "whitespace check done"
        );
        (ratios, findings)
    }
}
