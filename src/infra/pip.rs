//! Python module installer adapter.
//!
//! Same shape as the apt adapter: every call routed through a
//! `CommandRunner`. The program name comes from configuration (`pip` by
//! default, commonly `pip3`).

use std::time::Duration;

use crate::application::ports::{CommandRunner, PackageInstaller};
use crate::domain::error::StepError;
use crate::infra::{ensure_success, invocation_error};

/// Infrastructure adapter for the interpreted-language module installer.
pub struct PipInstaller<R: CommandRunner> {
    runner: R,
    program: String,
    install_timeout: Duration,
}

impl<R: CommandRunner> PipInstaller<R> {
    pub fn new(runner: R, program: &str, install_timeout: Duration) -> Self {
        Self {
            runner,
            program: program.to_string(),
            install_timeout,
        }
    }
}

impl<R: CommandRunner> PackageInstaller for PipInstaller<R> {
    async fn install(&self, packages: &[String]) -> Result<(), StepError> {
        let mut args = vec!["install"];
        args.extend(packages.iter().map(String::as_str));
        let output = self
            .runner
            .run_with_timeout(&self.program, &args, self.install_timeout)
            .await
            .map_err(|e| invocation_error(&self.program, &e))?;
        ensure_success(&self.program, &output)
    }

    async fn is_installed(&self, package: &str) -> Result<bool, StepError> {
        // `pip show` exits 1 (quietly) when the module is absent.
        let output = self
            .runner
            .run(&self.program, &["show", "--quiet", package])
            .await
            .map_err(|e| invocation_error(&self.program, &e))?;
        Ok(output.status.success())
    }
}
