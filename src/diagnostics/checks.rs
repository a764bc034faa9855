//! Quality Checks
//!
//! Empty rows, empty columns, duplicate rows and missing values per column.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::findings::{Category, Finding};
use crate::dataset::CsvDataset;

/// Counts gathered by the [`QualityChecker`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualitySummary {
    /// Rows where every cell is missing
    pub empty_row_count: usize,
    /// Columns where every cell is missing, in header order
    pub empty_columns: Vec<String>,
    /// Rows identical to an earlier row (first occurrence not counted)
    pub duplicate_row_count: usize,
    /// Missing cell count for every column, in header order
    pub missing_by_column: Vec<(String, usize)>,
}

/// Content checks over the whole dataset.
#[derive(Debug, Default, Clone, Copy)]
pub struct QualityChecker;

impl QualityChecker {
    /// Create a new quality checker
    pub fn new() -> Self {
        Self
    }

    /// Run all quality checks and return the counts with their findings.
    pub fn check(&self, dataset: &CsvDataset) -> (QualitySummary, Vec<Finding>) {
        let row_count = dataset.len();
        let mut findings = Vec::new();

        let empty_row_count = self.count_empty_rows(dataset);
        if empty_row_count > 0 {
            findings.push(Finding::warning(
                Category::MissingValue,
                format!("{empty_row_count} completely empty rows"),
            ));
        }

        let empty_columns = self.empty_columns(dataset);
        for name in &empty_columns {
            findings.push(
                Finding::warning(Category::MissingValue, format!("empty column: {name}"))
                    .for_column(name.clone()),
            );
        }

        let duplicate_row_count = self.count_duplicate_rows(dataset);
        if duplicate_row_count > 0 {
            findings.push(Finding::warning(
                Category::Duplicate,
                format!(
                    "{duplicate_row_count} duplicate rows ({:.2}%)",
                    percent(duplicate_row_count, row_count)
                ),
            ));
        }

        let missing_by_column = self.missing_by_column(dataset);
        for (name, missing) in &missing_by_column {
            if *missing > 0 {
                findings.push(
                    Finding::warning(
                        Category::MissingValue,
                        format!(
                            "column '{name}': {missing} missing values ({:.2}%)",
                            percent(*missing, row_count)
                        ),
                    )
                    .for_column(name.clone()),
                );
            }
        }

        debug!(
            empty_rows = empty_row_count,
            empty_columns = empty_columns.len(),
            duplicate_rows = duplicate_row_count,
            "quality checks done"
        );

        let summary = QualitySummary {
            empty_row_count,
            empty_columns,
            duplicate_row_count,
            missing_by_column,
        };
        (summary, findings)
    }

    /// Count rows whose every cell is missing
    pub fn count_empty_rows(&self, dataset: &CsvDataset) -> usize {
        dataset
            .rows()
            .filter(|row| row.iter().all(Option::is_none))
            .count()
    }

    /// Names of columns whose every cell is missing
    pub fn empty_columns(&self, dataset: &CsvDataset) -> Vec<String> {
        dataset
            .columns()
            .iter()
            .filter(|c| c.is_all_missing())
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Count rows that exactly repeat an earlier row.
    ///
    /// Cells are compared without normalisation; two missing cells are equal.
    pub fn count_duplicate_rows(&self, dataset: &CsvDataset) -> usize {
        let mut seen: HashSet<Vec<Option<&str>>> = HashSet::with_capacity(dataset.len());
        dataset
            .rows()
            .map(|row| seen.insert(row))
            .filter(|inserted| !inserted)
            .count()
    }

    /// Missing cell count per column
    pub fn missing_by_column(&self, dataset: &CsvDataset) -> Vec<(String, usize)> {
        dataset
            .columns()
            .iter()
            .map(|c| (c.name().to_string(), c.missing_count()))
            .collect()
    }
}

/// Percentage of `part` in `total`, 0 when `total` is 0.
pub(crate) fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
