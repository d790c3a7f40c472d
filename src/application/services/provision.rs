//! The provisioning engine: ordered, idempotent step execution.
//!
//! `ProvisionService::run` walks the plan strictly in declared order. Each
//! step gets its kind's idempotence probe first; only unsatisfied steps
//! perform their action. Every attempted step produces exactly one
//! [`StepResult`], and a fatal failure seals the report as aborted without
//! attempting later steps.

use std::time::{Duration, Instant};

use crate::application::ports::{
    ArtifactFetcher, IndexRefresher as _, KeyRegistrar as _, PackageInstaller, ProgressReporter,
    SourceListStore, SystemPackageManager,
};
use crate::domain::config::ProvisConfig;
use crate::domain::error::StepError;
use crate::domain::plan::Plan;
use crate::domain::report::{RunReport, StepResult};
use crate::domain::step::{Action, PackageManagerKind, Step};

/// Engine tuning knobs, resolved from config and CLI flags.
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Attempt budget per fetch step. Clamped to at least one attempt.
    pub fetch_retries: u32,
    /// Fixed wait between fetch attempts.
    pub retry_delay: Duration,
}

impl RunnerOptions {
    #[must_use]
    pub fn from_config(config: &ProvisConfig) -> Self {
        Self {
            fetch_retries: config.fetch.retries.max(1),
            retry_delay: Duration::from_secs(config.fetch.retry_delay_secs),
        }
    }
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self::from_config(&ProvisConfig::default())
    }
}

/// What a successfully attempted step turned out to be.
enum Attempt {
    Performed,
    AlreadySatisfied,
}

/// The step runner, generic over its ports so tests can inject doubles.
pub struct ProvisionService<'a, M, P, F, S, R>
where
    M: SystemPackageManager,
    P: PackageInstaller,
    F: ArtifactFetcher,
    S: SourceListStore,
    R: ProgressReporter,
{
    system: &'a M,
    python: &'a P,
    fetcher: &'a F,
    sources: &'a S,
    reporter: &'a R,
    options: RunnerOptions,
}

impl<'a, M, P, F, S, R> ProvisionService<'a, M, P, F, S, R>
where
    M: SystemPackageManager,
    P: PackageInstaller,
    F: ArtifactFetcher,
    S: SourceListStore,
    R: ProgressReporter,
{
    pub fn new(
        system: &'a M,
        python: &'a P,
        fetcher: &'a F,
        sources: &'a S,
        reporter: &'a R,
        options: RunnerOptions,
    ) -> Self {
        Self {
            system,
            python,
            fetcher,
            sources,
            reporter,
            options,
        }
    }

    /// Execute the plan and return the ordered run report.
    ///
    /// Never returns an error: step failures are recorded in the report, and
    /// the report's outcome and exit code carry the verdict.
    pub async fn run(&self, plan: &Plan) -> RunReport {
        let mut report = RunReport::new();
        for (index, step) in plan.steps().iter().enumerate() {
            self.reporter.begin(&step.description);
            let started = Instant::now();
            let result = match self.execute(step).await {
                Ok(Attempt::Performed) => StepResult::succeeded(&step.name, started.elapsed()),
                Ok(Attempt::AlreadySatisfied) => StepResult::skipped(&step.name, started.elapsed()),
                Err(e) => {
                    StepResult::failed(&step.name, e.class(), e.to_string(), started.elapsed())
                }
            };
            self.reporter.complete(&step.description, &result);
            let fatal = result.is_failed() && !step.continue_on_failure;
            report.push(result);
            if fatal {
                return report.aborted_at(index, &step.name);
            }
        }
        report
    }

    /// Probe, then perform if unsatisfied.
    ///
    /// A probe error fails the step: treating an unreadable trust store or
    /// source list as "not satisfied" could re-run an action against a host
    /// that is merely misconfigured.
    async fn execute(&self, step: &Step) -> Result<Attempt, StepError> {
        if self.already_satisfied(&step.action).await? {
            return Ok(Attempt::AlreadySatisfied);
        }
        self.perform(&step.action).await?;
        Ok(Attempt::Performed)
    }

    async fn already_satisfied(&self, action: &Action) -> Result<bool, StepError> {
        match action {
            Action::Fetch { dest, sha256, .. } => {
                self.fetcher.is_present(dest, sha256.as_deref())
            }
            Action::RegisterKey { key_id, .. } => self.system.is_key_registered(key_id).await,
            Action::AppendSourceLine { file, line } => self.sources.contains_line(file, line),
            // A refresh has no observable satisfied state.
            Action::RefreshIndex => Ok(false),
            Action::InstallPackages { manager, packages } => match manager {
                PackageManagerKind::Apt => all_installed(self.system, packages).await,
                PackageManagerKind::Pip => all_installed(self.python, packages).await,
            },
        }
    }

    async fn perform(&self, action: &Action) -> Result<(), StepError> {
        match action {
            Action::Fetch { url, dest, sha256 } => {
                self.fetch_with_retries(url, dest, sha256.as_deref()).await
            }
            Action::RegisterKey {
                key_file,
                remove_after,
                ..
            } => {
                self.system.register_key(key_file).await?;
                if *remove_after {
                    self.fetcher.discard(key_file)?;
                }
                Ok(())
            }
            Action::AppendSourceLine { file, line } => self.sources.append_line(file, line),
            Action::RefreshIndex => self.system.refresh_index().await,
            Action::InstallPackages { manager, packages } => match manager {
                PackageManagerKind::Apt => self.system.install(packages).await,
                PackageManagerKind::Pip => self.python.install(packages).await,
            },
        }
    }

    /// Exactly `fetch_retries` attempts, a fixed wait in between, and a
    /// presence check after each — success requires the artifact on disk,
    /// not merely a zero exit from the transfer command.
    async fn fetch_with_retries(
        &self,
        url: &str,
        dest: &std::path::Path,
        sha256: Option<&str>,
    ) -> Result<(), StepError> {
        let attempts = self.options.fetch_retries;
        let mut detail = String::from("no attempt recorded");
        for attempt in 1..=attempts {
            match self.fetcher.fetch(url, dest, sha256).await {
                Ok(()) => {
                    if self.fetcher.is_present(dest, sha256)? {
                        return Ok(());
                    }
                    detail = "transfer reported success but artifact is absent".to_string();
                }
                // Single-attempt network errors carry their own detail;
                // don't nest the wrapper message.
                Err(StepError::TransientNetwork { detail: d, .. }) => detail = d,
                Err(e) => detail = e.to_string(),
            }
            if attempt < attempts {
                tokio::time::sleep(self.options.retry_delay).await;
            }
        }
        Err(StepError::TransientNetwork {
            url: url.to_string(),
            attempts,
            detail,
        })
    }
}

/// An empty set is vacuously installed.
async fn all_installed<I: PackageInstaller>(
    installer: &I,
    packages: &[String],
) -> Result<bool, StepError> {
    for package in packages {
        if !installer.is_installed(package).await? {
            return Ok(false);
        }
    }
    Ok(true)
}
