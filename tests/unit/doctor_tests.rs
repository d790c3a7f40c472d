//! Tests for the doctor collaborator probes.

#![allow(clippy::expect_used)]

use provis_cli::application::services::doctor::probe_collaborators;

use crate::mocks::{MockCommandRunner, err_output, ok_output};

#[tokio::test]
async fn test_probe_reports_versions_for_found_commands() {
    let mock = MockCommandRunner::new_ok();
    // Scripted results are consumed in probe order: apt-get, curl, pip.
    mock.push_result(Ok(ok_output(b"apt 2.7.14 (amd64)\nUsage: apt-get ...\n")));
    mock.push_result(Ok(ok_output(b"curl 8.5.0 (x86_64-pc-linux-gnu)\n")));
    mock.push_result(Ok(ok_output(b"pip 24.0 from /usr/lib/python3\n")));

    let checks = probe_collaborators(&mock, "pip").await;

    assert!(checks.apt_get_found);
    assert_eq!(checks.apt_get_version.as_deref(), Some("apt 2.7.14 (amd64)"));
    assert!(checks.curl_found);
    assert_eq!(
        checks.curl_version.as_deref(),
        Some("curl 8.5.0 (x86_64-pc-linux-gnu)")
    );
    assert!(checks.pip_found);
    assert_eq!(checks.pip_program, "pip");

    let calls = mock.recorded_calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|(_, args)| args == &vec!["--version"]));
}

#[tokio::test]
async fn test_probe_marks_missing_and_broken_commands_not_found() {
    let mock = MockCommandRunner::new_ok();
    mock.push_result(Ok(ok_output(b"apt 2.7.14 (amd64)\n")));
    // curl exits non-zero; pip fails to spawn entirely.
    mock.push_result(Ok(err_output(2, b"unknown option")));
    mock.push_result(Err(anyhow::anyhow!("failed to spawn pip3")));

    let checks = probe_collaborators(&mock, "pip3").await;

    assert!(checks.apt_get_found);
    assert!(!checks.curl_found);
    assert!(checks.curl_version.is_none());
    assert!(!checks.pip_found);
    assert_eq!(checks.pip_program, "pip3");
}
