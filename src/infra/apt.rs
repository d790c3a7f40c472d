//! Native package-manager adapter: apt-get, apt-key, and dpkg-query.
//!
//! `AptPackageManager<R>` routes every call through a `CommandRunner`, so
//! tests can inject a mock runner without spawning real processes.

use std::path::Path;
use std::time::Duration;

use crate::application::ports::{CommandRunner, IndexRefresher, KeyRegistrar, PackageInstaller};
use crate::domain::error::StepError;
use crate::infra::{ensure_success, invocation_error};

/// Infrastructure adapter for the Debian-family package-management commands.
pub struct AptPackageManager<R: CommandRunner> {
    runner: R,
    /// Timeout for the slow mutations (index refresh, installs). Queries use
    /// the runner's default.
    install_timeout: Duration,
}

impl<R: CommandRunner> AptPackageManager<R> {
    pub fn new(runner: R, install_timeout: Duration) -> Self {
        Self {
            runner,
            install_timeout,
        }
    }

    async fn run_checked(&self, program: &str, args: &[&str]) -> Result<(), StepError> {
        let output = self
            .runner
            .run(program, args)
            .await
            .map_err(|e| invocation_error(program, &e))?;
        ensure_success(program, &output)
    }

    async fn run_checked_slow(&self, program: &str, args: &[&str]) -> Result<(), StepError> {
        let output = self
            .runner
            .run_with_timeout(program, args, self.install_timeout)
            .await
            .map_err(|e| invocation_error(program, &e))?;
        ensure_success(program, &output)
    }
}

impl<R: CommandRunner> KeyRegistrar for AptPackageManager<R> {
    async fn register_key(&self, key_file: &Path) -> Result<(), StepError> {
        let path = key_file.to_string_lossy();
        self.run_checked("apt-key", &["add", path.as_ref()]).await
    }

    async fn is_key_registered(&self, key_id: &str) -> Result<bool, StepError> {
        let output = self
            .runner
            .run("apt-key", &["list"])
            .await
            .map_err(|e| invocation_error("apt-key", &e))?;
        ensure_success("apt-key", &output)?;
        // apt-key prints fingerprints in space-grouped blocks; compare with
        // whitespace stripped on both sides.
        let listing = normalize_fingerprint(&String::from_utf8_lossy(&output.stdout));
        Ok(listing.contains(&normalize_fingerprint(key_id)))
    }
}

impl<R: CommandRunner> IndexRefresher for AptPackageManager<R> {
    async fn refresh_index(&self) -> Result<(), StepError> {
        self.run_checked_slow("apt-get", &["update"]).await
    }
}

impl<R: CommandRunner> PackageInstaller for AptPackageManager<R> {
    async fn install(&self, packages: &[String]) -> Result<(), StepError> {
        let mut args = vec!["install", "-y"];
        args.extend(packages.iter().map(String::as_str));
        self.run_checked_slow("apt-get", &args).await
    }

    async fn is_installed(&self, package: &str) -> Result<bool, StepError> {
        let output = self
            .runner
            .run("dpkg-query", &["-W", "-f=${db:Status-Status}", package])
            .await
            .map_err(|e| invocation_error("dpkg-query", &e))?;
        // dpkg-query exits non-zero for packages it has never heard of.
        if !output.status.success() {
            return Ok(false);
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim() == "installed")
    }
}

fn normalize_fingerprint(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}
