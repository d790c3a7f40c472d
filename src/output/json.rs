//! JSON output helpers.
//!
//! Every `--json` code path goes through this renderer so machine consumers
//! see one stable shape per command, plus a shared error-object formatter.

use anyhow::{Context, Result};

use crate::domain::config::ProvisConfig;
use crate::domain::health::HostChecks;
use crate::domain::plan::Plan;
use crate::domain::report::RunReport;

/// Machine-readable renderer: pretty-printed JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Print the full run report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_report(&self, report: &RunReport) -> Result<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// Print the resolved plan as a step list.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_plan(&self, plan: &Plan) -> Result<()> {
        let obj = serde_json::json!({ "steps": plan.steps() });
        println!(
            "{}",
            serde_json::to_string_pretty(&obj).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// Print doctor checks and collected issues.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_doctor(&self, checks: &HostChecks, issues: &[String]) -> Result<()> {
        let obj = serde_json::json!({ "checks": checks, "issues": issues });
        println!(
            "{}",
            serde_json::to_string_pretty(&obj).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// Print the current configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &ProvisConfig, path: &str) -> Result<()> {
        let obj = serde_json::json!({ "path": path, "config": config });
        println!(
            "{}",
            serde_json::to_string_pretty(&obj).context("JSON serialization failed")?
        );
        Ok(())
    }
}

/// Format a JSON error object for `--json` failure paths.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails (should not happen in
/// practice — `serde_json` only fails on non-finite floats and maps with
/// non-string keys, neither of which appear here).
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
