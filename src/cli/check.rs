//! The `csv-health <path>` command: load, diagnose, print.

use std::{
    io::{self, Write},
    path::Path,
};

use super::OutputFormat;
use crate::diagnostics::{Category, ColumnStatistics, DiagnosticPipeline, Report};

const RULE_WIDTH: usize = 80;

/// Diagnose a CSV file and print the report to stdout.
pub(crate) fn cmd_check(path: &Path, format: OutputFormat) -> crate::Result<()> {
    let report = DiagnosticPipeline::new().diagnose(path)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match format {
        OutputFormat::Text => write_text_report(&mut out, path, &report),
        OutputFormat::Json => serde_json::to_writer_pretty(&mut out, &report)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(out)),
    };
    written.map_err(|e| crate::Error::io(e, "<stdout>"))
}

/// Render the human-readable report.
pub(crate) fn write_text_report<W: Write>(
    out: &mut W,
    path: &Path,
    report: &Report,
) -> io::Result<()> {
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "DIAGNOSIS REPORT OF {}", file_name)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "Dimensions: {} rows x {} columns",
        report.row_count, report.column_count
    )?;
    writeln!(out)?;

    writeln!(out, "Columns ({}):", report.columns.len())?;
    for column in &report.columns {
        writeln!(
            out,
            "  {} ({}, {}) - {} missing",
            column.name, column.data_type, column.kind, column.missing
        )?;
    }
    writeln!(out)?;

    for category in Category::ALL {
        writeln!(out, "{}", category.title())?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        let mut any = false;
        for finding in report.findings_in(category) {
            writeln!(out, "  {}", finding)?;
            any = true;
        }
        if !any {
            writeln!(out, "  No issues")?;
        }
        writeln!(out)?;
    }

    write_statistics_table(out, report)?;
    writeln!(out)?;

    let warnings = report.warning_count();
    if warnings == 0 {
        writeln!(out, "\u{2713} No issues found")?;
    } else {
        writeln!(out, "\u{26A0} Found {} warnings", warnings)?;
    }
    Ok(())
}

fn write_statistics_table<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    writeln!(out, "Basic Statistics")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "{:<16} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "COLUMN", "COUNT", "MEAN", "STD", "MIN", "25%", "50%", "75%", "MAX"
    )?;

    let mut categorical = Vec::new();
    for profile in &report.statistics {
        match &profile.statistics {
            ColumnStatistics::Numeric(s) => writeln!(
                out,
                "{:<16} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
                truncate(&profile.column, 16),
                s.count,
                number(s.mean),
                s.std_dev.map_or_else(|| "-".to_string(), number),
                number(s.min),
                number(s.q1),
                number(s.median),
                number(s.q3),
                number(s.max)
            )?,
            ColumnStatistics::Categorical(s) => categorical.push((&profile.column, s)),
            ColumnStatistics::Undefined => writeln!(
                out,
                "{:<16} {:>6}   statistics undefined (no non-missing values)",
                truncate(&profile.column, 16),
                0
            )?,
        }
    }

    if !categorical.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "{:<16} {:>6} {:>8} {:<24} {:>6}",
            "COLUMN", "COUNT", "UNIQUE", "TOP", "FREQ"
        )?;
        for (column, s) in categorical {
            writeln!(
                out,
                "{:<16} {:>6} {:>8} {:<24} {:>6}",
                truncate(column, 16),
                s.count,
                s.unique,
                truncate(&s.top, 24),
                s.freq
            )?;
        }
    }
    Ok(())
}

fn number(value: f64) -> String {
    format!("{:.3}", value)
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut s: String = value.chars().take(width.saturating_sub(1)).collect();
        s.push('\u{2026}');
        s
    }
}
