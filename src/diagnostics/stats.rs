//! Descriptive statistics per column.
//!
//! Numeric columns get count, mean, standard deviation, min, quartiles and
//! max. Every other column gets count, unique count and the most frequent
//! value. Only non-missing values are used.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::findings::{Category, Finding};
use crate::dataset::{Column, ColumnKind, CsvDataset};

/// Statistics for a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    /// Number of non-missing values
    pub count: usize,
    /// Mean value
    pub mean: f64,
    /// Sample standard deviation (n - 1); absent below two values
    pub std_dev: Option<f64>,
    /// Minimum value
    pub min: f64,
    /// 25th percentile (Q1)
    pub q1: f64,
    /// 50th percentile (median)
    pub median: f64,
    /// 75th percentile (Q3)
    pub q3: f64,
    /// Maximum value
    pub max: f64,
}

impl NumericStats {
    /// Compute statistics over `values`. Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = sorted.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let std_dev = (n > 1).then(|| {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        });

        Some(Self {
            count: n,
            mean,
            std_dev,
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[n - 1],
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Linear interpolation between the closest ranks of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    if sorted[lower] == sorted[upper] {
        return sorted[lower];
    }
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Statistics for a non-numeric column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalStats {
    /// Number of non-missing values
    pub count: usize,
    /// Number of distinct values
    pub unique: usize,
    /// Most frequent value (first seen wins ties)
    pub top: String,
    /// Occurrences of `top`
    pub freq: usize,
}

impl CategoricalStats {
    /// Compute statistics over `values`. Returns `None` when there are none.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();
        let mut count = 0;

        for value in values {
            count += 1;
            let c = counts.entry(value).or_insert(0);
            if *c == 0 {
                order.push(value);
            }
            *c += 1;
        }

        // Strictly greater keeps the earliest value on ties.
        let mut top: Option<(&str, usize)> = None;
        for value in order {
            let freq = counts.get(value).copied().unwrap_or(0);
            if top.map_or(true, |(_, best)| freq > best) {
                top = Some((value, freq));
            }
        }

        top.map(|(value, freq)| Self {
            count,
            unique: counts.len(),
            top: value.to_string(),
            freq,
        })
    }
}

/// Statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnStatistics {
    /// Numeric summary
    Numeric(NumericStats),
    /// Count / unique / top / freq summary
    Categorical(CategoricalStats),
    /// The column has no non-missing values
    Undefined,
}

impl ColumnStatistics {
    /// Number of values the statistics were computed over.
    pub fn count(&self) -> usize {
        match self {
            Self::Numeric(s) => s.count,
            Self::Categorical(s) => s.count,
            Self::Undefined => 0,
        }
    }

    /// Returns true if nothing could be computed.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

/// Statistics paired with the column they describe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    /// Column name
    pub column: String,
    /// Type tag of the column
    pub kind: ColumnKind,
    /// Computed statistics
    pub statistics: ColumnStatistics,
}

/// Computes descriptive statistics for every column.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatisticsGenerator;

impl StatisticsGenerator {
    /// Create a new statistics generator
    pub fn new() -> Self {
        Self
    }

    /// Profile every column. Columns without values produce an
    /// informational finding instead of an error.
    pub fn generate(&self, dataset: &CsvDataset) -> (Vec<ColumnProfile>, Vec<Finding>) {
        let mut findings = Vec::new();
        let profiles: Vec<ColumnProfile> = dataset
            .columns()
            .iter()
            .map(|column| {
                let statistics = self.column_statistics(column);
                if statistics.is_undefined() {
                    findings.push(
                        Finding::info(
                            Category::Statistical,
                            format!(
                                "statistics undefined for column '{}' (no non-missing values)",
                                column.name()
                            ),
                        )
                        .for_column(column.name()),
                    );
                }
                ColumnProfile {
                    column: column.name().to_string(),
                    kind: column.kind(),
                    statistics,
                }
            })
            .collect();

        debug!(columns = profiles.len(), "statistics generated");
        (profiles, findings)
    }

    /// Statistics for a single column
    pub fn column_statistics(&self, column: &Column) -> ColumnStatistics {
        let stats = match column.kind() {
            ColumnKind::Numeric => {
                let values: Vec<f64> = column
                    .present_values()
                    .filter_map(|v| v.parse::<f64>().ok())
                    .collect();
                NumericStats::from_values(&values).map(ColumnStatistics::Numeric)
            }
            ColumnKind::Textual | ColumnKind::Other => {
                CategoricalStats::from_values(column.present_values())
                    .map(ColumnStatistics::Categorical)
            }
        };
        stats.unwrap_or(ColumnStatistics::Undefined)
    }
}
