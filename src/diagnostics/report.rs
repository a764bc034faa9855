//! Report assembly.

use serde::Serialize;

use super::{
    checks::QualitySummary,
    findings::{Category, Finding},
    stats::ColumnProfile,
    whitespace::WhitespaceRatio,
};
use crate::dataset::{Column, ColumnKind};

/// Name and inferred type of a column, with its missing cell count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSummary {
    /// Column name
    pub name: String,
    /// Type tag
    pub kind: ColumnKind,
    /// Arrow data type as inferred by the reader
    pub data_type: String,
    /// Missing cells in this column
    pub missing: usize,
}

impl From<&Column> for ColumnSummary {
    fn from(column: &Column) -> Self {
        Self {
            name: column.name().to_string(),
            kind: column.kind(),
            data_type: column.data_type().to_string(),
            missing: column.missing_count(),
        }
    }
}

/// The outcome of one diagnostic run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// File the dataset came from, if any
    pub source: Option<String>,
    /// Data rows (header excluded)
    pub row_count: usize,
    /// Columns
    pub column_count: usize,
    /// Column names and inferred types in header order
    pub columns: Vec<ColumnSummary>,
    /// All findings, grouped by category
    pub findings: Vec<Finding>,
    /// Empty/duplicate/missing counts
    pub quality: QualitySummary,
    /// Per-column statistics in header order
    pub statistics: Vec<ColumnProfile>,
    /// Pollution ratio of every textual column
    pub whitespace: Vec<WhitespaceRatio>,
}

impl Report {
    /// Findings of one category, in check order.
    pub fn findings_in(&self, category: Category) -> impl Iterator<Item = &Finding> + '_ {
        self.findings.iter().filter(move |f| f.category == category)
    }

    /// All warnings, in report order.
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> + '_ {
        self.findings.iter().filter(|f| f.is_warning())
    }

    /// Number of warnings
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Returns true if any check raised a warning
    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }
}

/// Order findings by category; the sort is stable so findings within a
/// category keep the order their checks produced them in.
pub fn assemble_findings(mut findings: Vec<Finding>) -> Vec<Finding> {
    findings.sort_by_key(|f| f.category);
    findings
}
