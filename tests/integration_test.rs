//! Integration tests for the account-reports CLI.
//!
//! These tests run the actual binary over monthly export fixtures and
//! verify the emitted comparison table.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Run the binary over the three fixture months and return stdout
fn run_report(extra_args: &[&str]) -> String {
    let mut cmd = Command::cargo_bin("account-reports").unwrap();
    cmd.arg(test_data_path("accounts-20140201.csv"))
        .arg(test_data_path("accounts-20140301.csv"))
        .arg(test_data_path("accounts-20140401.csv"));
    for arg in extra_args {
        cmd.arg(arg);
    }
    let assert = cmd.assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_comparison_table_for_fixture_months() {
    let expected = "\
,Feb 2014,Mar 2014,Change
New Accounts,1,1,
New Free,1,1,
New Paid,1,1,
Total Free @ EOM,2,2,0.00%
Paid to Free*,0,1,
Free to Paid*,0,1,
* Need to validate.
";

    assert_eq!(run_report(&[]), expected);
}

#[test]
fn test_header_format_flag_changes_column_labels() {
    let output = run_report(&["--header-format", "%Y-%m"]);
    assert!(output.starts_with(",2014-02,2014-03,Change"));
}

#[test]
fn test_list_paid_flag_prints_new_paid_ids() {
    let output = run_report(&["--list-paid"]);
    assert!(output.contains("New, paid account ids: 104"));
}

#[test]
fn test_plan_breakdown_flag_prints_counts_for_newest_month() {
    let output = run_report(&["--plan-breakdown"]);
    assert!(output.contains("free-annual: 1"));
    assert!(output.contains("free-monthly: 1"));
    assert!(output.contains("seat-5: 3"));
    // Trial and inactive accounts stay out of the breakdown.
    assert!(!output.contains("seat-9"));
}

#[test]
fn test_generated_snapshots_in_temp_dir() {
    let dir = tempfile::tempdir().unwrap();

    let months = [
        ("accounts-20140201.csv", "2013-12-01 10:00:00+00:00"),
        ("accounts-20140301.csv", "2013-12-01 10:00:00+00:00"),
        ("accounts-20140401.csv", "2013-12-01 10:00:00+00:00"),
    ];
    let mut paths: Vec<PathBuf> = Vec::new();
    for (name, created) in months {
        let path = dir.path().join(name);
        fs::write(
            &path,
            format!("Account ID,Active,Plan Code,Created\n1,True,free-monthly,{}\n", created),
        )
        .unwrap();
        paths.push(path);
    }

    let mut cmd = Command::cargo_bin("account-reports").unwrap();
    let assert = cmd.args(&paths).assert().success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    // One long-standing free account in every month: totals stay flat.
    assert!(output.contains("Total Free @ EOM,1,1,0.00%"));
    assert!(output.contains("New Accounts,0,0,"));
}

#[test]
fn test_missing_file_error() {
    let mut cmd = Command::cargo_bin("account-reports").unwrap();
    cmd.arg("accounts-20140201.csv")
        .arg("accounts-20140301.csv")
        .arg("accounts-20140401.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_argument_error() {
    let mut cmd = Command::cargo_bin("account-reports").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing input file"));
}

#[test]
fn test_unrecognized_filename_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latest.csv");
    fs::write(&path, "Account ID,Active,Plan Code,Created\n").unwrap();

    let mut cmd = Command::cargo_bin("account-reports").unwrap();
    cmd.arg(&path)
        .arg(&path)
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized report filename"));
}

#[test]
fn test_unordered_snapshots_are_rejected() {
    let mut cmd = Command::cargo_bin("account-reports").unwrap();
    cmd.arg(test_data_path("accounts-20140401.csv"))
        .arg(test_data_path("accounts-20140301.csv"))
        .arg(test_data_path("accounts-20140201.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid period ordering"));
}

#[test]
fn test_malformed_timestamp_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();

    let good = dir.path().join("accounts-20140201.csv");
    fs::write(
        &good,
        "Account ID,Active,Plan Code,Created\n1,True,seat-5,2013-12-01 10:00:00+00:00\n",
    )
    .unwrap();
    let mid = dir.path().join("accounts-20140301.csv");
    fs::write(
        &mid,
        "Account ID,Active,Plan Code,Created\n1,True,seat-5,2013-12-01 10:00:00+00:00\n",
    )
    .unwrap();
    let bad = dir.path().join("accounts-20140401.csv");
    fs::write(
        &bad,
        "Account ID,Active,Plan Code,Created\n1,True,seat-5,December 1st\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("account-reports").unwrap();
    cmd.arg(&good)
        .arg(&mid)
        .arg(&bad)
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("row 2").and(predicate::str::contains("malformed")),
        );
}
