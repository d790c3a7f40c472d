//! Integration tests for the provis CLI skeleton: argument parsing, help,
//! version, and the doctor JSON shape.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn provis() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("provis"));
    cmd.env("NO_COLOR", "1");
    // Hermetic: ignore the invoking user's config and CI autodetection.
    cmd.env("PROVIS_CONFIG", "/nonexistent/provis-test-config.yaml");
    cmd.env_remove("CI");
    cmd.env_remove("PROVIS_YES");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    provis().assert().code(2).stderr(predicate::str::contains(
        "Idempotent provisioning for the media-processing toolchain",
    ));
}

#[test]
fn test_cli_help_flag_shows_help() {
    provis()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    provis()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("provis"));
}

#[test]
fn test_version_command_shows_version() {
    provis()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("provis 0.3.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    provis()
        .arg("version")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""version":"0.3.0""#));
}

// --- Command hierarchy tests ---

#[test]
fn test_help_shows_run_command() {
    provis()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_help_shows_plan_command() {
    provis()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"));
}

#[test]
fn test_help_shows_doctor_command() {
    provis()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn test_unknown_command_exits_two() {
    provis().arg("frobnicate").assert().code(2);
}

// --- Doctor ---

#[test]
fn test_doctor_json_has_checks_and_issues() {
    let output = provis()
        .arg("doctor")
        .arg("--json")
        .output()
        .expect("doctor runs");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("doctor output is JSON");
    assert!(json["checks"]["collaborators"].is_object());
    assert!(json["checks"]["sources"].is_object());
    assert!(json["issues"].is_array());
}
