//! Doctor check domain types and pure diagnostic functions.
//!
//! This module is intentionally free of I/O, async, and external layer
//! imports. All functions take data in and return data out.

use serde::Serialize;

// ── Types ─────────────────────────────────────────────────────────────────────

/// All check categories returned by the doctor command.
#[derive(Debug, Serialize)]
pub struct HostChecks {
    /// External collaborator commands.
    pub collaborators: CollaboratorChecks,
    /// Source list file state.
    pub sources: SourceListChecks,
}

/// Presence and versions of the external commands the runner drives.
#[derive(Debug, Serialize)]
pub struct CollaboratorChecks {
    /// Whether `apt-get` is on PATH.
    pub apt_get_found: bool,
    /// First line of `apt-get --version`, if found.
    pub apt_get_version: Option<String>,
    /// Whether `curl` is on PATH.
    pub curl_found: bool,
    /// First line of `curl --version`, if found.
    pub curl_version: Option<String>,
    /// Whether the configured pip program is on PATH.
    pub pip_found: bool,
    /// First line of `<pip> --version`, if found.
    pub pip_version: Option<String>,
    /// The configured pip program name.
    pub pip_program: String,
}

/// State of the package source list file.
#[derive(Debug, Serialize)]
pub struct SourceListChecks {
    /// Path probed, normally `/etc/apt/sources.list`.
    pub path: String,
    /// Whether the file exists.
    pub exists: bool,
    /// Whether the file (or its directory, when absent) accepts appends.
    pub writable: bool,
}

// ── Pure diagnostics ──────────────────────────────────────────────────────────

/// Collect human-readable issues from check results.
#[must_use]
pub fn collect_issues(checks: &HostChecks) -> Vec<String> {
    let mut issues = Vec::new();
    if !checks.collaborators.apt_get_found {
        issues.push("apt-get is not installed".to_string());
    }
    if !checks.collaborators.curl_found {
        issues.push("curl is not installed (needed for fetch steps)".to_string());
    }
    if !checks.collaborators.pip_found {
        issues.push(format!(
            "{} is not installed (needed for Python module steps)",
            checks.collaborators.pip_program
        ));
    }
    if !checks.sources.writable {
        issues.push(format!(
            "{} is not writable (run as root?)",
            checks.sources.path
        ));
    }
    issues
}

// ── Unit tests ────────────────────────────────────────────────────────────────
