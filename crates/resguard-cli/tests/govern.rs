//! End-to-end CLI tests against `tests/fixtures/governance`.
//!
//! The fixture holds a `resguard.yaml`, a `policies/` directory, a scanner `inventory.json`
//! and the golden `expected.report.json` (timestamps and version use placeholders).

use assert_cmd::Command;
use predicates::prelude::*;
use resguard_test_util::normalize_nondeterministic;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a Command for the resguard binary.
/// Wraps the deprecated cargo_bin to centralize the deprecation warning.
#[allow(deprecated)]
fn resguard_cmd() -> Command {
    Command::cargo_bin("resguard").expect("resguard binary not found - run `cargo build` first")
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("resguard-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

fn governance_dir() -> PathBuf {
    fixtures_dir().join("governance")
}

fn run_govern(extra: &[&str]) -> (i32, Value, TempDir) {
    let fixture = governance_dir();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = temp_dir.path().join("out").join("report.json");

    let output = resguard_cmd()
        .arg("--root")
        .arg(&fixture)
        .args(extra)
        .arg("govern")
        .arg("--inventory")
        .arg(fixture.join("inventory.json"))
        .arg("--report-out")
        .arg(&report_path)
        .output()
        .expect("Failed to run command");

    let exit_code = output.status.code().unwrap_or(-1);
    let report_content = std::fs::read_to_string(&report_path).expect("Failed to read report");
    let report: Value = serde_json::from_str(&report_content).expect("Failed to parse report JSON");
    (exit_code, report, temp_dir)
}

#[test]
fn govern_matches_golden_report() {
    let (exit_code, report, _tmp) = run_govern(&[]);

    let expected_text = std::fs::read_to_string(governance_dir().join("expected.report.json"))
        .expect("Failed to read expected report");
    let expected: Value = serde_json::from_str(&expected_text).expect("parse expected report");

    let actual = normalize_nondeterministic(report);
    let expected = normalize_nondeterministic(expected);
    assert_eq!(
        actual,
        expected,
        "Report mismatch.\n\nActual:\n{}\n\nExpected:\n{}",
        serde_json::to_string_pretty(&actual).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap()
    );
    assert_eq!(exit_code, 2, "a blocked decision should exit with 2");
}

#[test]
fn govern_profile_and_dry_run_flags_are_recorded() {
    let (_, report, _tmp) = run_govern(&["--profile", "cautious"]);
    assert_eq!(report["run"]["profile"], "cautious");
    assert_eq!(report["run"]["dry_run"], true);
}

#[test]
fn govern_no_dry_run_overrides_config() {
    let fixture = governance_dir();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = temp_dir.path().join("report.json");

    resguard_cmd()
        .arg("--root")
        .arg(&fixture)
        .arg("govern")
        .arg("--inventory")
        .arg(fixture.join("inventory.json"))
        .arg("--report-out")
        .arg(&report_path)
        .arg("--no-dry-run")
        .assert()
        .code(2);

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read report"))
            .expect("parse report");
    assert_eq!(report["run"]["dry_run"], false);
}

#[test]
fn govern_without_blocked_decisions_exits_zero() {
    let fixture = governance_dir();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = temp_dir.path().join("report.json");

    resguard_cmd()
        .arg("--root")
        .arg(&fixture)
        .arg("govern")
        .arg("--inventory")
        .arg(fixture.join("inventory.json"))
        .arg("--policies")
        .arg("policies/snapshots.yaml")
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .success();

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read report"))
            .expect("parse report");
    assert_eq!(report["summary"]["matches"], 1);
    assert_eq!(report["decisions"][0]["resource"]["resource_id"], "snap-1");
}

#[test]
fn govern_missing_inventory_is_a_runtime_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    resguard_cmd()
        .arg("--root")
        .arg(temp_dir.path())
        .arg("govern")
        .arg("--inventory")
        .arg(temp_dir.path().join("missing.json"))
        .arg("--report-out")
        .arg(temp_dir.path().join("report.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("resguard error"));
}

#[test]
fn govern_unknown_profile_is_a_runtime_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    resguard_cmd()
        .arg("--root")
        .arg(governance_dir())
        .arg("--profile")
        .arg("reckless")
        .arg("govern")
        .arg("--inventory")
        .arg(governance_dir().join("inventory.json"))
        .arg("--report-out")
        .arg(temp_dir.path().join("report.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown profile 'reckless'"));
}

#[test]
fn impact_prints_json() {
    let fixture = governance_dir();
    let output = resguard_cmd()
        .arg("--root")
        .arg(&fixture)
        .arg("impact")
        .arg("--inventory")
        .arg(fixture.join("inventory.json"))
        .arg("disk-1")
        .output()
        .expect("run impact");
    assert!(output.status.success());

    let impact: Value = serde_json::from_slice(&output.stdout).expect("impact json");
    assert_eq!(impact["safe"], false);
    assert_eq!(impact["direct_dependents"], serde_json::json!(["vm-7"]));
    assert_eq!(impact["transitive_dependents"], serde_json::json!([]));
}

#[test]
fn orphans_prints_one_id_per_line() {
    let fixture = governance_dir();
    resguard_cmd()
        .arg("--root")
        .arg(&fixture)
        .arg("orphans")
        .arg("--inventory")
        .arg(fixture.join("inventory.json"))
        .assert()
        .success()
        .stdout("snap-1\n");
}

#[test]
fn validate_reports_failed_files() {
    resguard_cmd()
        .arg("--root")
        .arg(fixtures_dir())
        .arg("validate")
        .arg("--policies")
        .arg("policy_isolation")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("failed"))
        .stdout(predicate::str::contains("2 policies loaded"));
}

#[test]
fn validate_uses_configured_paths() {
    resguard_cmd()
        .arg("--root")
        .arg(governance_dir())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 policies loaded"));
}

#[test]
fn explain_known_identifier() {
    resguard_cmd()
        .arg("explain")
        .arg("blocked_by_dependency")
        .assert()
        .success()
        .stdout(predicate::str::contains("Blocked by dependency"))
        .stdout(predicate::str::contains("Gate: terminal"))
        .stdout(predicate::str::contains("What to do:"));
}

#[test]
fn explain_reflects_profile() {
    resguard_cmd()
        .arg("--profile")
        .arg("cautious")
        .arg("explain")
        .arg("stop")
        .assert()
        .success()
        .stdout(predicate::str::contains("destructive under profile \"cautious\""));
}

#[test]
fn explain_unknown_identifier_lists_alternatives() {
    resguard_cmd()
        .arg("explain")
        .arg("nuke")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no action or decision state named \"nuke\""))
        .stderr(predicate::str::contains("archive"));
}
