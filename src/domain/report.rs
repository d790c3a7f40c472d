//! Run report types — the ordered audit trail of one provisioning run.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::error::FailureClass;

/// Outcome of one attempted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepOutcome {
    Succeeded,
    SkippedAlreadySatisfied,
    Failed,
}

/// Result of one attempted step, recorded immediately after it executes.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub name: String,
    pub outcome: StepOutcome,
    /// Diagnostic message for failures (and occasionally for skips).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failure class, present iff `outcome` is `failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureClass>,
    /// Wall-clock duration of the probe plus the action.
    pub duration_ms: u64,
}

impl StepResult {
    #[must_use]
    pub fn succeeded(name: &str, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            outcome: StepOutcome::Succeeded,
            message: None,
            failure: None,
            duration_ms: duration_millis(duration),
        }
    }

    #[must_use]
    pub fn skipped(name: &str, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            outcome: StepOutcome::SkippedAlreadySatisfied,
            message: None,
            failure: None,
            duration_ms: duration_millis(duration),
        }
    }

    #[must_use]
    pub fn failed(name: &str, class: FailureClass, message: String, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            outcome: StepOutcome::Failed,
            message: Some(message),
            failure: Some(class),
            duration_ms: duration_millis(duration),
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.outcome == StepOutcome::Failed
    }
}

fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Overall outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum RunOutcome {
    /// Every step was attempted (some may have failed non-fatally).
    Complete,
    /// A fatal step failure stopped the run; no results exist past `index`.
    AbortedAtStep { index: usize, name: String },
}

/// The ordered sequence of step results plus the overall outcome.
///
/// Results are appended in plan order; the sequence is always a prefix of
/// the declared steps.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub results: Vec<StepResult>,
    pub outcome: RunOutcome,
}

impl RunReport {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            results: Vec::new(),
            outcome: RunOutcome::Complete,
        }
    }

    pub fn push(&mut self, result: StepResult) {
        self.results.push(result);
    }

    /// Seal the report as aborted at the given step.
    #[must_use]
    pub fn aborted_at(mut self, index: usize, name: &str) -> Self {
        self.outcome = RunOutcome::AbortedAtStep {
            index,
            name: name.to_string(),
        };
        self
    }

    /// Process exit code: 0 when complete, otherwise the failure class code
    /// of the aborting step.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match &self.outcome {
            RunOutcome::Complete => 0,
            RunOutcome::AbortedAtStep { index, .. } => self
                .results
                .get(*index)
                .and_then(|r| r.failure)
                .map_or(1, FailureClass::exit_code),
        }
    }

    /// Count of results with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: StepOutcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
