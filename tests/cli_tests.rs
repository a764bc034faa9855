#![allow(clippy::unwrap_used)] // Tests can use unwrap() for simplicity
//! CLI integration tests with assert_cmd.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn csv_health() -> Command {
    Command::cargo_bin("csv-health").expect("Failed to find csv-health binary")
}

fn fixture(name: &str, content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn test_check_prints_report() {
    let (_dir, path) = fixture("orders.csv", "id,item,id\n1, pen,1\n1, pen,1\n");

    csv_health()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("DIAGNOSIS REPORT OF orders.csv"))
        .stdout(predicate::str::contains("Dimensions: 2 rows x 3 columns"))
        .stdout(predicate::str::contains("duplicate column: id (2 occurrences)"))
        .stdout(predicate::str::contains("1 duplicate rows"))
        .stdout(predicate::str::contains("Basic Statistics"));
}

#[test]
fn test_check_clean_file() {
    let (_dir, path) = fixture("clean.csv", "a,b\n1,x\n2,y\n");

    csv_health()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_json_output_parses() {
    let (_dir, path) = fixture("data.csv", "a,b\n1, x\n2,\n");

    let output = csv_health()
        .arg(&path)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["row_count"], 2);
    assert_eq!(json["column_count"], 2);
    assert!(json["findings"].as_array().is_some_and(|f| !f.is_empty()));
}

#[test]
fn test_missing_file_fails() {
    csv_health()
        .arg("/nonexistent/data.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_wrong_extension_fails() {
    let (_dir, path) = fixture("data.txt", "a,b\n1,2\n");

    csv_health()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_header_only_file_fails() {
    let (_dir, path) = fixture("header.csv", "a,b\n");

    csv_health()
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_prompts_for_path() {
    let (_dir, path) = fixture("prompted.csv", "a\n1\n2\n");

    csv_health()
        .write_stdin(format!("\n{}\n", path.display()))
        .assert()
        .success()
        .stderr(predicate::str::contains("Enter csv file path:"))
        .stderr(predicate::str::contains("The input provided is empty"))
        .stdout(predicate::str::contains("DIAGNOSIS REPORT OF prompted.csv"));
}

#[test]
fn test_prompt_eof_fails() {
    csv_health()
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no file path provided"));
}

#[test]
fn test_help() {
    csv_health()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--format"));
}
