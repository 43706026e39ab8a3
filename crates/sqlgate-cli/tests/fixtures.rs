//! End-to-end CLI tests over the query fixtures.
//!
//! Each fixture in `tests/fixtures/` contains:
//! - `query.sql`: the candidate, exactly as a generator might emit it
//! - `sqlgate.toml` (optional): the policy to apply
//! - `expected.verdict.json`: the verdict the gateway must return
//!
//! The exit code must agree with the verdict (0 accepted, 2 rejected).

use assert_cmd::Command;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn sqlgate_cmd() -> Command {
    Command::cargo_bin("sqlgate").expect("sqlgate binary not found - run `cargo build` first")
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("sqlgate-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

fn run_check_on_fixture(fixture_name: &str) -> (i32, Value) {
    let fixture_path = fixtures_dir().join(fixture_name);
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let mut cmd = sqlgate_cmd();
    cmd.current_dir(temp_dir.path())
        .arg("check")
        .arg("--file")
        .arg(fixture_path.join("query.sql"));
    let config = fixture_path.join("sqlgate.toml");
    if config.exists() {
        cmd.arg("--config").arg(config);
    }

    let output = cmd.output().expect("Failed to run command");
    let exit_code = output.status.code().unwrap_or(-1);
    let report: Value = serde_json::from_slice(&output.stdout).expect("Failed to parse report JSON");

    (exit_code, report)
}

fn load_expected_verdict(fixture_name: &str) -> Value {
    let path = fixtures_dir()
        .join(fixture_name)
        .join("expected.verdict.json");
    let content = std::fs::read_to_string(&path).expect("Failed to read expected verdict");
    serde_json::from_str(&content).expect("Failed to parse expected verdict")
}

fn assert_fixture(fixture_name: &str, expected_exit: i32) {
    let (exit_code, report) = run_check_on_fixture(fixture_name);
    let expected = load_expected_verdict(fixture_name);

    assert_eq!(exit_code, expected_exit, "exit code for fixture '{fixture_name}'");
    assert_eq!(
        report["verdict"],
        expected,
        "Verdict mismatch for fixture '{}'.\n\nActual:\n{}\n\nExpected:\n{}",
        fixture_name,
        serde_json::to_string_pretty(&report["verdict"]).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap()
    );
}

#[test]
fn fixture_aggregate_accepted() {
    assert_fixture("aggregate_accepted", 0);
}

#[test]
fn fixture_delete_rejected() {
    assert_fixture("delete_rejected", 2);
}

#[test]
fn fixture_stacked_drop() {
    assert_fixture("stacked_drop", 2);
}

#[test]
fn fixture_unlisted_table() {
    assert_fixture("unlisted_table", 2);
}

#[test]
fn fixture_limit_clamped() {
    assert_fixture("limit_clamped", 0);
}

#[test]
fn fixture_empty_input() {
    assert_fixture("empty_input", 2);
}

#[test]
fn fixture_comments_stripped() {
    assert_fixture("comments_stripped", 0);
}

#[test]
fn fixture_strict_union() {
    assert_fixture("strict_union", 2);
}

#[test]
fn fixture_custom_tables() {
    assert_fixture("custom_tables", 0);
}

#[test]
fn every_fixture_has_a_test() {
    let mut names: Vec<String> = std::fs::read_dir(fixtures_dir())
        .expect("read fixtures dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "aggregate_accepted",
            "comments_stripped",
            "custom_tables",
            "delete_rejected",
            "empty_input",
            "limit_clamped",
            "stacked_drop",
            "strict_union",
            "unlisted_table",
        ]
    );
}
