//! Human-readable terminal renderer.

use crate::domain::config::ProvisConfig;
use crate::domain::health::HostChecks;
use crate::domain::plan::Plan;
use crate::domain::report::{RunOutcome, RunReport, StepOutcome};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if !self.ctx.quiet {
            println!("provis {version}");
        }
    }

    /// Render the end-of-run summary under the step log.
    pub fn render_report_summary(&self, report: &RunReport) {
        let succeeded = report.count(StepOutcome::Succeeded);
        let skipped = report.count(StepOutcome::SkippedAlreadySatisfied);
        let failed = report.count(StepOutcome::Failed);

        match &report.outcome {
            RunOutcome::Complete => {
                let mut parts = vec![format!("{succeeded} succeeded")];
                if skipped > 0 {
                    parts.push(format!("{skipped} already satisfied"));
                }
                if failed > 0 {
                    parts.push(format!("{failed} failed non-fatally"));
                }
                self.ctx
                    .success(&format!("Provisioning complete ({})", parts.join(", ")));
                if failed > 0 {
                    self.ctx.warn("Some non-fatal steps failed; re-run to retry them.");
                }
            }
            RunOutcome::AbortedAtStep { index, name } => {
                self.ctx
                    .error(&format!("Provisioning aborted at step {} ('{name}')", index + 1));
                self.ctx
                    .info("Fix the issue and re-run; completed steps will be skipped.");
            }
        }
    }

    /// Render the resolved plan without executing it.
    pub fn render_plan(&self, plan: &Plan) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.header("Provisioning plan:");
        println!();
        for (index, step) in plan.steps().iter().enumerate() {
            let marker = if step.continue_on_failure {
                "  [keeps going on failure]"
            } else {
                ""
            };
            println!(
                "  {:>2}. {:<26} {:<20} {}{marker}",
                index + 1,
                step.name,
                step.action.kind(),
                step.description,
            );
        }
        println!();
        self.ctx
            .info(&format!("{} step(s). Execute with: provis run", plan.len()));
    }

    /// Render doctor checks and collected issues.
    pub fn render_doctor(&self, checks: &HostChecks, issues: &[String]) {
        self.ctx.header("External collaborators:");
        let c = &checks.collaborators;
        render_probe(self.ctx, "apt-get", c.apt_get_found, c.apt_get_version.as_deref());
        render_probe(self.ctx, "curl", c.curl_found, c.curl_version.as_deref());
        render_probe(self.ctx, &c.pip_program, c.pip_found, c.pip_version.as_deref());

        println!();
        self.ctx.header("Source list:");
        self.ctx.kv("Path:", &checks.sources.path);
        if checks.sources.writable {
            self.ctx.success(if checks.sources.exists {
                "Present and writable"
            } else {
                "Absent, directory writable"
            });
        } else {
            self.ctx.warn("Not writable");
        }

        println!();
        if issues.is_empty() {
            self.ctx.success("No issues found");
        } else {
            for issue in issues {
                self.ctx.error(issue);
            }
        }
    }

    /// Render the current configuration and where it lives.
    pub fn render_config(&self, config: &ProvisConfig, path: &str) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.kv("Config file:", path);
        self.ctx
            .kv("fetch.retries:", &config.fetch.retries.to_string());
        self.ctx.kv(
            "fetch.retry_delay_secs:",
            &config.fetch.retry_delay_secs.to_string(),
        );
        self.ctx.kv(
            "fetch.attempt_timeout_secs:",
            &config.fetch.attempt_timeout_secs.to_string(),
        );
        self.ctx
            .kv("install.timeout_secs:", &config.install.timeout_secs.to_string());
        self.ctx.kv("python.pip_program:", &config.python.pip_program);
    }
}

fn render_probe(ctx: &OutputContext, name: &str, found: bool, version: Option<&str>) {
    if found {
        ctx.success(&format!("{name}: {}", version.unwrap_or("found")));
    } else {
        ctx.warn(&format!("{name}: not found"));
    }
}
