//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, artifact
//! downloads, package-manager invocation, and file access.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod apt;
pub mod command_runner;
pub mod config;
pub mod fetch;
pub mod pip;
pub mod sources;

use std::process::Output;

use crate::domain::error::StepError;

/// Longest stderr excerpt carried into a diagnostic message.
const STDERR_EXCERPT_LEN: usize = 300;

/// Map a non-zero exit to `StepError::Command` with a stderr excerpt.
pub(crate) fn ensure_success(program: &str, output: &Output) -> Result<(), StepError> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut excerpt = stderr.trim().to_string();
    if excerpt.len() > STDERR_EXCERPT_LEN {
        let cut = excerpt
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|&i| i <= STDERR_EXCERPT_LEN)
            .last()
            .unwrap_or(0);
        excerpt.truncate(cut);
        excerpt.push_str("...");
    }
    Err(StepError::Command {
        program: program.to_string(),
        code: output.status.code().unwrap_or(-1),
        stderr: excerpt,
    })
}

/// Map a spawn/timeout failure from the command runner to the command class.
pub(crate) fn invocation_error(program: &str, error: &anyhow::Error) -> StepError {
    StepError::Command {
        program: program.to_string(),
        code: -1,
        stderr: format!("{error:#}"),
    }
}
