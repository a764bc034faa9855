//! Structural checks: header validity, duplicate column names, dimensions.

use std::collections::HashMap;

use tracing::debug;

use super::findings::{Category, Finding};
use crate::dataset::CsvDataset;

/// Checks the shape of a dataset rather than its content.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralChecker;

impl StructuralChecker {
    /// Create a new structural checker
    pub fn new() -> Self {
        Self
    }

    /// Run all structural checks in order.
    pub fn check(&self, dataset: &CsvDataset) -> Vec<Finding> {
        let names = dataset.column_names();

        let mut findings = Vec::new();
        findings.extend(self.check_header(&names));
        findings.extend(self.check_duplicate_columns(&names));
        findings.push(self.dimensions(dataset));

        debug!(findings = findings.len(), "structural checks done");
        findings
    }

    /// Flag a header that is entirely blank, or individual blank names.
    pub fn check_header(&self, names: &[&str]) -> Vec<Finding> {
        if names.iter().all(|n| n.trim().is_empty()) {
            return vec![Finding::warning(Category::Structural, "missing header")];
        }

        names
            .iter()
            .enumerate()
            .filter(|(_, n)| n.trim().is_empty())
            .map(|(idx, _)| {
                Finding::warning(
                    Category::Structural,
                    format!("blank column name at position {}", idx + 1),
                )
            })
            .collect()
    }

    /// Flag every name appearing more than once, in order of first appearance.
    ///
    /// Names are compared exactly: `Name` and `name` are different columns.
    pub fn check_duplicate_columns(&self, names: &[&str]) -> Vec<Finding> {
        duplicate_names(names)
            .into_iter()
            .map(|(name, count)| {
                Finding::warning(
                    Category::Structural,
                    format!("duplicate column: {name} ({count} occurrences)"),
                )
                .for_column(name)
            })
            .collect()
    }

    /// Row and column counts, recorded unconditionally.
    pub fn dimensions(&self, dataset: &CsvDataset) -> Finding {
        Finding::info(
            Category::Structural,
            format!(
                "dataset has {} rows and {} columns",
                dataset.len(),
                dataset.column_count()
            ),
        )
    }
}

/// Non-blank names that occur at least twice, with their occurrence counts.
pub(crate) fn duplicate_names<'a>(names: &[&'a str]) -> Vec<(&'a str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();

    for &name in names {
        if name.trim().is_empty() {
            continue;
        }
        let count = counts.entry(name).or_insert(0);
        if *count == 0 {
            order.push(name);
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter_map(|name| {
            let count = counts.get(name).copied().unwrap_or(0);
            (count > 1).then_some((name, count))
        })
        .collect()
}
