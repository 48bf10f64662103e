//! Integration tests for the `tracker` binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PREHEAT: &str = r#"{
    "organisationUnits": [
        { "uid": "district", "name": "District", "path": "/district" },
        { "uid": "clinic", "name": "Clinic", "path": "/district/clinic" }
    ],
    "programs": [{
        "uid": "p1",
        "code": "ANC",
        "name": "Antenatal care",
        "programType": "WITH_REGISTRATION",
        "organisationUnits": ["clinic"],
        "programStages": [{ "uid": "ps1", "name": "Visit", "program": "p1", "sortOrder": 1 }]
    }],
    "categoryOptionCombos": [{ "uid": "cocDefault", "name": "default", "isDefault": true }]
}"#;

const USER: &str = r#""user": { "uid": "u1", "username": "clerk", "organisationUnits": ["district"] }"#;

const CLEAN_EVENTS: &str = r#""events": [
    { "event": "ev1", "program": "p1", "programStage": "ps1", "orgUnit": "clinic",
      "occurredAt": "2024-03-01T00:00:00Z" }
]"#;

const BAD_ENROLLMENTS: &str = r#""enrollments": [
    { "enrollment": "en1", "trackedEntity": "te1", "program": "nope", "orgUnit": "clinic",
      "enrolledAt": "2024-01-01T00:00:00Z" },
    { "enrollment": "en2", "trackedEntity": "te1", "program": "gone", "orgUnit": "clinic",
      "enrolledAt": "2024-01-01T00:00:00Z" }
]"#;

/// A scratch directory with a preheat snapshot and an isolated config home.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("preheat.json"), PREHEAT).unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn bundle(&self, name: &str, body: &str) -> &Self {
        fs::write(self.path().join(name), body).unwrap();
        self
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo::cargo_bin_cmd!("tracker");
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env_remove("RUST_LOG")
            .env_remove("NO_COLOR")
            .env_remove("TRACKER__VALIDATION__MODE");
        cmd
    }

    fn validate(&self, bundle: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.args([
            "validate",
            bundle,
            "--preheat",
            "preheat.json",
            "--now",
            "2024-06-01T00:00:00Z",
        ]);
        cmd
    }
}

fn with_user(body: &str) -> String {
    format!("{{ {USER}, {body} }}")
}

#[test]
fn test_help_flag() {
    cargo::cargo_bin_cmd!("tracker")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("codes"));
}

#[test]
fn test_version_flag() {
    cargo::cargo_bin_cmd!("tracker")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_clean_bundle_succeeds() {
    let ws = Workspace::new();
    ws.bundle("bundle.json", &with_user(CLEAN_EVENTS));

    ws.validate("bundle.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("No validation errors"));
}

#[test]
fn test_rejected_bundle_exits_5_and_lists_codes() {
    let ws = Workspace::new();
    ws.bundle("bundle.json", &with_user(BAD_ENROLLMENTS));

    ws.validate("bundle.json")
        .assert()
        .code(5)
        .stdout(predicate::str::contains("E1069"))
        .stdout(predicate::str::contains("en2"))
        .stderr(predicate::str::contains("2 error(s)"));
}

#[test]
fn test_json_report_is_parseable() {
    let ws = Workspace::new();
    ws.bundle("bundle.json", &with_user(BAD_ENROLLMENTS));

    let output = ws
        .validate("bundle.json")
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(5));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "full");
    assert_eq!(report["aborted"], false);
    let reports = report["errorReports"].as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["errorCode"], "E1069");
    assert_eq!(reports[0]["uid"], "en1");
}

#[test]
fn test_fail_fast_flag_stops_at_first_error() {
    let ws = Workspace::new();
    ws.bundle("bundle.json", &with_user(BAD_ENROLLMENTS));

    ws.validate("bundle.json")
        .args(["--mode", "fail-fast", "--format", "codes"])
        .assert()
        .code(5)
        .stdout(predicate::str::diff("E1069\ten1\n"))
        .stderr(predicate::str::contains("stopping early"));
}

#[test]
fn test_fail_fast_from_environment() {
    let ws = Workspace::new();
    ws.bundle("bundle.json", &with_user(BAD_ENROLLMENTS));

    ws.validate("bundle.json")
        .args(["--format", "codes"])
        .env("TRACKER__VALIDATION__MODE", "fail-fast")
        .assert()
        .code(5)
        .stdout(predicate::str::diff("E1069\ten1\n"));
}

#[test]
fn test_missing_bundle_exits_3() {
    let ws = Workspace::new();

    ws.validate("absent.json")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("absent.json"));
}

#[test]
fn test_malformed_bundle_is_user_error() {
    let ws = Workspace::new();
    ws.bundle("bundle.json", "{ \"events\": [");

    ws.validate("bundle.json").assert().code(2);
}

#[test]
fn test_bundle_without_user_is_a_fault() {
    let ws = Workspace::new();
    ws.bundle("bundle.json", &format!("{{ {CLEAN_EVENTS} }}"));

    ws.validate("bundle.json")
        .assert()
        .code(6)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_preheat_is_required() {
    let ws = Workspace::new();
    ws.bundle("bundle.json", &with_user(CLEAN_EVENTS));

    ws.cmd()
        .args(["validate", "bundle.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--preheat"));
}

#[test]
fn test_codes_lookup() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["codes", "E1056"])
        .assert()
        .success()
        .stdout(predicate::str::contains("E1056"))
        .stdout(predicate::str::contains("{0}"));
}

#[test]
fn test_codes_json_lists_catalog() {
    let ws = Workspace::new();

    let output = ws.cmd().args(["codes", "--format", "json"]).output().unwrap();

    assert!(output.status.success());
    let codes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let codes = codes.as_array().unwrap();
    assert!(codes.iter().any(|c| c["code"] == "E1000"));
    assert!(codes.iter().all(|c| c["template"].is_string()));
}

#[test]
fn test_unknown_code_exits_3() {
    let ws = Workspace::new();

    ws.cmd().args(["codes", "E9999"]).assert().code(3);
}

#[test]
fn test_config_get_reads_environment() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["config", "get", "validation.mode"])
        .env("TRACKER__VALIDATION__MODE", "fail-fast")
        .assert()
        .success()
        .stdout(predicate::str::contains("fail-fast"));
}

#[test]
fn test_config_file_sets_report_format() {
    let ws = Workspace::new();
    ws.bundle("bundle.json", &with_user(BAD_ENROLLMENTS));
    fs::write(ws.path().join("tracker.toml"), "[output]\nformat = \"codes\"\n").unwrap();

    ws.validate("bundle.json")
        .args(["--config", "tracker.toml"])
        .assert()
        .code(5)
        .stdout(predicate::str::diff("E1069\ten1\nE1069\ten2\n"));
}

#[test]
fn test_missing_explicit_config_exits_4() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["--config", "nowhere.toml", "codes"])
        .assert()
        .code(4);
}

#[test]
fn test_completions_bash() {
    cargo::cargo_bin_cmd!("tracker")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tracker"));
}
