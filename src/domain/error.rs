//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

// ── Step errors ───────────────────────────────────────────────────────────────

/// Errors a provisioning step can fail with.
///
/// The three variants are the full failure taxonomy: every step failure is
/// one of a fetch retry budget exhausted, an external command exiting
/// non-zero, or a local filesystem write going wrong.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("artifact {url} not present after {attempts} attempt(s): {detail}")]
    TransientNetwork {
        url: String,
        attempts: u32,
        detail: String,
    },

    #[error("{program} exited with code {code}: {stderr}")]
    Command {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("cannot write {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StepError {
    /// The failure class recorded in the step result and mapped to the
    /// process exit code.
    #[must_use]
    pub const fn class(&self) -> FailureClass {
        match self {
            Self::TransientNetwork { .. } => FailureClass::Network,
            Self::Command { .. } => FailureClass::CommandFailed,
            Self::Filesystem { .. } => FailureClass::Filesystem,
        }
    }
}

/// Coarse failure classification surfaced in reports and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureClass {
    Network,
    CommandFailed,
    Filesystem,
}

impl FailureClass {
    /// Process exit code for an aborted run. Code 2 is left to clap for
    /// usage errors; 1 stays the generic failure code.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::CommandFailed => 3,
            Self::Network => 4,
            Self::Filesystem => 5,
        }
    }
}

// ── Plan errors ───────────────────────────────────────────────────────────────

/// Errors rejecting a step plan before anything executes.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("plan contains no steps")]
    Empty,

    #[error("duplicate step name '{0}': step names must be unique")]
    DuplicateName(String),

    #[error("invalid step name '{0}': must match ^[a-z0-9]([a-z0-9-]{{0,61}}[a-z0-9])?$")]
    InvalidName(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nExpected: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}
