//! Loading a CSV file from disk.
//!
//! Loading is an ordered list of validation steps. Each step either passes
//! or fails with the error kind that describes the problem; the first failure
//! aborts the load and no diagnostic check ever runs.

use std::path::Path;

use tracing::{debug, info};

use crate::{
    dataset::CsvDataset,
    error::{Error, Result},
};

/// A single path validation step.
type Step = fn(&Path) -> Result<()>;

/// Path checks, run in order before the file is read.
const PATH_STEPS: &[(&str, Step)] = &[
    ("exists", check_exists),
    ("is_file", check_is_file),
    ("extension", check_extension),
];

/// Loads and parses a CSV file.
///
/// # Errors
///
/// - [`Error::NotFound`] if the path does not exist
/// - [`Error::InvalidFormat`] if the path is a directory, does not end in
///   `.csv`, or its content is not valid CSV
/// - [`Error::EmptyFile`] if the file has no bytes, no columns or no data rows
/// - [`Error::Io`] if the file cannot be read
pub fn load(path: impl AsRef<Path>) -> Result<CsvDataset> {
    let path = path.as_ref();

    for (name, step) in PATH_STEPS {
        debug!(step = name, path = %path.display(), "validating path");
        step(path)?;
    }

    let bytes = std::fs::read(path).map_err(|e| Error::io(e, path))?;
    if bytes.is_empty() {
        return Err(Error::empty_file(Some(path), "file has no content"));
    }

    let dataset = CsvDataset::parse(&bytes, Some(path))?;
    info!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.column_count(),
        "CSV loaded"
    );
    Ok(dataset)
}

fn check_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::not_found(path))
    }
}

fn check_is_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::invalid_format(path, "path is a directory, not a file"))
    }
}

fn check_extension(path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(()),
        Some(ext) => Err(Error::invalid_format(
            path,
            format!("not a CSV file (extension: .{ext})"),
        )),
        None => Err(Error::invalid_format(path, "not a CSV file (no extension)")),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_load_valid_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("people.csv");
        fs::write(&path, "name,age\nann,31\nbob,42\n").unwrap();

        let dataset = load(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.column_count(), 2);
        assert_eq!(dataset.source(), Some(path.as_path()));
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let result = load("/nonexistent/path/to/file.csv");
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_directory_is_invalid_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("folder.csv");
        fs::create_dir(&dir).unwrap();

        let result = load(&dir);
        assert!(matches!(result, Err(Error::InvalidFormat { .. })));
    }

    #[test]
    fn test_wrong_extension_is_invalid_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("data.txt");
        fs::write(&path, "a,b\n1,2\n").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));
        assert!(err.to_string().contains(".txt"));
    }

    #[test]
    fn test_no_extension_is_invalid_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("data");
        fs::write(&path, "a,b\n1,2\n").unwrap();

        assert!(matches!(load(&path), Err(Error::InvalidFormat { .. })));
    }

    #[test]
    fn test_uppercase_extension_accepted() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("DATA.CSV");
        fs::write(&path, "a,b\n1,2\n").unwrap();

        assert!(load(&path).is_ok());
    }

    #[test]
    fn test_zero_byte_file_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();

        assert!(matches!(load(&path), Err(Error::EmptyFile { .. })));
    }

    #[test]
    fn test_header_only_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("header.csv");
        fs::write(&path, "a,b,c\n").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, Error::EmptyFile { .. }));
        assert!(err.to_string().contains("header.csv"));
    }

    #[test]
    fn test_unparsable_content_is_invalid_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("ragged.csv");
        fs::write(&path, "a,b\n1,2\n1,2,3,4\n").unwrap();

        assert!(matches!(load(&path), Err(Error::InvalidFormat { .. })));
    }

    #[test]
    fn test_out_of_range_date_loads() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("events.csv");
        fs::write(&path, "d,x\n2024-01-01,a\n2024-13-01,b\n").unwrap();

        let dataset = load(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.columns()[0].present_values().collect::<Vec<_>>(),
            vec!["2024-01-01", "2024-13-01"]
        );
    }

    #[test]
    fn test_steps_short_circuit_in_order() {
        // A missing path with the wrong extension reports NotFound first.
        let result = load("/nonexistent/notes.txt");
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }
}
