//! Doctor probes — verify the external collaborators before a run.

use crate::application::ports::CommandRunner;
use crate::domain::health::CollaboratorChecks;

/// Probe the external commands the runner drives (`apt-get`, `curl`, and the
/// configured pip program) by asking each for its version.
pub async fn probe_collaborators<R: CommandRunner>(
    runner: &R,
    pip_program: &str,
) -> CollaboratorChecks {
    let (apt_get, curl, pip) = tokio::join!(
        probe_version(runner, "apt-get"),
        probe_version(runner, "curl"),
        probe_version(runner, pip_program),
    );

    CollaboratorChecks {
        apt_get_found: apt_get.is_some(),
        apt_get_version: apt_get,
        curl_found: curl.is_some(),
        curl_version: curl,
        pip_found: pip.is_some(),
        pip_version: pip,
        pip_program: pip_program.to_string(),
    }
}

/// First line of `<program> --version`, or `None` when the command is
/// missing or exits non-zero.
async fn probe_version<R: CommandRunner>(runner: &R, program: &str) -> Option<String> {
    let output = runner.run(program, &["--version"]).await.ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    Some(stdout.lines().next().unwrap_or("").trim().to_string())
}
