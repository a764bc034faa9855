//! Error types for csv-health.

use std::path::{Path, PathBuf};

/// Result type alias for csv-health operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a CSV file.
///
/// Every variant is raised before any diagnostic check runs. Once a
/// [`CsvDataset`](crate::CsvDataset) exists the pipeline itself cannot fail.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The input path does not exist.
    #[error("File '{}' does not exist", .path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The input is not a CSV file, or its content cannot be parsed as CSV.
    #[error("Invalid CSV format{}: {message}", display_path(.path.as_deref()))]
    InvalidFormat {
        /// The offending file, if the content came from disk.
        path: Option<PathBuf>,
        /// Description of the format problem.
        message: String,
    },

    /// The file has no bytes, no columns, or only a header row.
    #[error("CSV file{} is empty: {reason}", display_path(.path.as_deref()))]
    EmptyFile {
        /// The offending file, if the content came from disk.
        path: Option<PathBuf>,
        /// What exactly was missing.
        reason: &'static str,
    },

    /// I/O error during file operations.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration or user input.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| format!(" '{}'", p.display()))
        .unwrap_or_default()
}

impl Error {
    /// Create a not-found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an invalid format error for a file on disk.
    pub fn invalid_format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: Some(path.into()),
            message: message.into(),
        }
    }

    /// Create an invalid format error for in-memory content.
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: None,
            message: message.into(),
        }
    }

    /// Create an empty file error.
    pub fn empty_file(path: Option<&Path>, reason: &'static str) -> Self {
        Self::EmptyFile {
            path: path.map(Path::to_path_buf),
            reason,
        }
    }

    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Wrap a parse failure reported by the Arrow CSV reader.
    pub(crate) fn from_arrow(err: &arrow::error::ArrowError, path: Option<&Path>) -> Self {
        Self::InvalidFormat {
            path: path.map(Path::to_path_buf),
            message: err.to_string(),
        }
    }
}
