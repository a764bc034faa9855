//! Findings
//!
//! A [`Finding`] is one diagnostic fact produced by a check.

use std::fmt;

use serde::Serialize;

/// Category a finding belongs to.
///
/// Declaration order is the order categories appear in a
/// [`Report`](super::Report).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Header and dimension facts
    Structural,
    /// Repeated rows
    Duplicate,
    /// Missing cells, empty rows and empty columns
    MissingValue,
    /// Descriptive statistics
    Statistical,
    /// Leading/trailing whitespace in text values
    Whitespace,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Self; 5] = [
        Self::Structural,
        Self::Duplicate,
        Self::MissingValue,
        Self::Statistical,
        Self::Whitespace,
    ];

    /// Human-readable section title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Structural => "Structure",
            Self::Duplicate => "Duplicates",
            Self::MissingValue => "Missing values",
            Self::Statistical => "Statistics",
            Self::Whitespace => "Whitespace",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural => write!(f, "structural"),
            Self::Duplicate => write!(f, "duplicate"),
            Self::MissingValue => write!(f, "missing-value"),
            Self::Statistical => write!(f, "statistical"),
            Self::Whitespace => write!(f, "whitespace"),
        }
    }
}

/// How much attention a finding deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, recorded unconditionally
    Info,
    /// A data problem worth looking at
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

/// A single diagnostic fact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    /// Category of the check that produced it
    pub category: Category,
    /// Severity level
    pub severity: Severity,
    /// Column the finding is about, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Human-readable message
    pub message: String,
}

impl Finding {
    /// Create a warning.
    pub fn warning(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            severity: Severity::Warning,
            column: None,
            message: message.into(),
        }
    }

    /// Create an informational finding.
    pub fn info(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            severity: Severity::Info,
            column: None,
            message: message.into(),
        }
    }

    /// Attach the column this finding is about.
    #[must_use]
    pub fn for_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Returns true for warnings.
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}
