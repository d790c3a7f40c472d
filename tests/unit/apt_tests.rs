//! Argument-construction and parsing tests for the apt and pip adapters.
//!
//! Each test hands a cloned `MockCommandRunner` to the adapter and keeps the
//! original to inspect the shared call log.

#![allow(clippy::expect_used)]

use std::path::Path;
use std::time::Duration;

use provis_cli::application::ports::{IndexRefresher, KeyRegistrar, PackageInstaller};
use provis_cli::domain::error::{FailureClass, StepError};
use provis_cli::infra::apt::AptPackageManager;
use provis_cli::infra::pip::PipInstaller;

use crate::mocks::{MockCommandRunner, err_output, ok_output};

const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

// ── apt-get install / update ──────────────────────────────────────────────────

#[tokio::test]
async fn test_install_builds_apt_get_install_args() {
    let mock = MockCommandRunner::new_ok();
    let manager = AptPackageManager::new(mock.clone(), INSTALL_TIMEOUT);
    manager
        .install(&["ffmpeg".to_string(), "espeak".to_string()])
        .await
        .expect("install succeeds");

    let calls = mock.recorded_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "apt-get");
    assert_eq!(calls[0].1, vec!["install", "-y", "ffmpeg", "espeak"]);
}

#[tokio::test]
async fn test_refresh_index_runs_apt_get_update() {
    let mock = MockCommandRunner::new_ok();
    let manager = AptPackageManager::new(mock.clone(), INSTALL_TIMEOUT);
    manager.refresh_index().await.expect("refresh succeeds");

    let calls = mock.recorded_calls();
    assert_eq!(calls[0].0, "apt-get");
    assert_eq!(calls[0].1, vec!["update"]);
}

#[tokio::test]
async fn test_install_failure_carries_program_and_code() {
    let mock = MockCommandRunner::new_err();
    let manager = AptPackageManager::new(mock, INSTALL_TIMEOUT);
    let err = manager
        .install(&["ffmpeg".to_string()])
        .await
        .expect_err("install fails");

    match &err {
        StepError::Command {
            program,
            code,
            stderr,
        } => {
            assert_eq!(program, "apt-get");
            assert_eq!(*code, 1);
            assert!(stderr.contains("boom"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.class(), FailureClass::CommandFailed);
}

// ── dpkg-query probe ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_is_installed_parses_dpkg_status() {
    let mock = MockCommandRunner::new_ok();
    mock.push_result(Ok(ok_output(b"installed\n")));
    let manager = AptPackageManager::new(mock.clone(), INSTALL_TIMEOUT);
    assert!(manager.is_installed("ffmpeg").await.expect("probe"));

    let calls = mock.recorded_calls();
    assert_eq!(calls[0].0, "dpkg-query");
    assert_eq!(calls[0].1, vec!["-W", "-f=${db:Status-Status}", "ffmpeg"]);
}

#[tokio::test]
async fn test_is_installed_false_for_removed_package() {
    let mock = MockCommandRunner::new_ok();
    mock.push_result(Ok(ok_output(b"config-files\n")));
    let manager = AptPackageManager::new(mock, INSTALL_TIMEOUT);
    assert!(!manager.is_installed("ffmpeg").await.expect("probe"));
}

#[tokio::test]
async fn test_is_installed_false_for_unknown_package() {
    // dpkg-query exits non-zero for packages it has never heard of.
    let mock = MockCommandRunner::new_ok();
    mock.push_result(Ok(err_output(1, b"no packages found matching nope")));
    let manager = AptPackageManager::new(mock, INSTALL_TIMEOUT);
    assert!(!manager.is_installed("nope").await.expect("probe"));
}

// ── apt-key ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_register_key_builds_apt_key_add_args() {
    let mock = MockCommandRunner::new_ok();
    let manager = AptPackageManager::new(mock.clone(), INSTALL_TIMEOUT);
    manager
        .register_key(Path::new("/tmp/key.asc"))
        .await
        .expect("register succeeds");

    let calls = mock.recorded_calls();
    assert_eq!(calls[0].0, "apt-key");
    assert_eq!(calls[0].1, vec!["add", "/tmp/key.asc"]);
}

#[tokio::test]
async fn test_is_key_registered_matches_spaced_fingerprint() {
    let listing = b"pub   rsa4096 2016-08-01\n      5C80 8C2B 6555 8117\nuid  multimedia\n";
    let mock = MockCommandRunner::new_ok();
    mock.push_result(Ok(ok_output(listing)));
    let manager = AptPackageManager::new(mock, INSTALL_TIMEOUT);
    assert!(
        manager
            .is_key_registered("5c808c2b65558117")
            .await
            .expect("probe")
    );
}

#[tokio::test]
async fn test_is_key_registered_false_when_absent() {
    let mock = MockCommandRunner::new_ok();
    mock.push_result(Ok(ok_output(b"pub rsa4096\n      AAAA BBBB\n")));
    let manager = AptPackageManager::new(mock, INSTALL_TIMEOUT);
    assert!(
        !manager
            .is_key_registered("5C808C2B65558117")
            .await
            .expect("probe")
    );
}

#[tokio::test]
async fn test_is_key_registered_propagates_listing_failure() {
    let mock = MockCommandRunner::new_err();
    let manager = AptPackageManager::new(mock, INSTALL_TIMEOUT);
    let err = manager
        .is_key_registered("5C808C2B65558117")
        .await
        .expect_err("listing fails");
    assert_eq!(err.class(), FailureClass::CommandFailed);
}

// ── pip adapter ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_pip_install_uses_configured_program() {
    let mock = MockCommandRunner::new_ok();
    let pip = PipInstaller::new(mock.clone(), "pip3", INSTALL_TIMEOUT);
    pip.install(&["numpy".to_string(), "lxml".to_string()])
        .await
        .expect("install succeeds");

    let calls = mock.recorded_calls();
    assert_eq!(calls[0].0, "pip3");
    assert_eq!(calls[0].1, vec!["install", "numpy", "lxml"]);
}

#[tokio::test]
async fn test_pip_is_installed_uses_show_exit_code() {
    let mock = MockCommandRunner::new_ok();
    mock.push_result(Ok(ok_output(b"Name: numpy\n")));
    mock.push_result(Ok(err_output(1, b"")));
    let pip = PipInstaller::new(mock.clone(), "pip", INSTALL_TIMEOUT);

    assert!(pip.is_installed("numpy").await.expect("probe"));
    assert!(!pip.is_installed("missing").await.expect("probe"));

    let calls = mock.recorded_calls();
    assert_eq!(calls[0].1, vec!["show", "--quiet", "numpy"]);
}
