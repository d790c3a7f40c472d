//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::config::ProvisConfig;
use crate::domain::error::StepError;
use crate::domain::report::StepResult;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(&self, program: &str, args: &[&str], timeout: Duration)
    -> Result<Output>;
}

// ── Step Action Ports ─────────────────────────────────────────────────────────

/// One download attempt plus artifact lifecycle.
///
/// `fetch` must be atomic: `dest` may only exist once the artifact is fully
/// written, so a partially-transferred file is never mistaken for success.
#[allow(async_fn_in_trait)]
pub trait ArtifactFetcher {
    /// Download `url` to `dest` in a single attempt, verifying `sha256` when
    /// given. Retrying is the caller's concern.
    async fn fetch(&self, url: &str, dest: &Path, sha256: Option<&str>) -> Result<(), StepError>;

    /// Whether a complete artifact already exists at `dest` (digest checked
    /// when given — a mismatch counts as absent).
    fn is_present(&self, dest: &Path, sha256: Option<&str>) -> Result<bool, StepError>;

    /// Remove a no-longer-needed artifact. Missing files are not an error.
    fn discard(&self, path: &Path) -> Result<(), StepError>;
}

/// Trust-key registration with the package manager.
#[allow(async_fn_in_trait)]
pub trait KeyRegistrar {
    /// Register the key file with the trust store.
    async fn register_key(&self, key_file: &Path) -> Result<(), StepError>;

    /// Whether the key id already appears in the trust store listing.
    async fn is_key_registered(&self, key_id: &str) -> Result<bool, StepError>;
}

/// Package index refresh.
#[allow(async_fn_in_trait)]
pub trait IndexRefresher {
    async fn refresh_index(&self) -> Result<(), StepError>;
}

/// Installation of a named package set.
#[allow(async_fn_in_trait)]
pub trait PackageInstaller {
    /// Install the whole set in one command invocation.
    async fn install(&self, packages: &[String]) -> Result<(), StepError>;

    /// Whether a single package is already installed.
    async fn is_installed(&self, package: &str) -> Result<bool, StepError>;
}

/// Composite trait — any type implementing the three native package-manager
/// sub-traits is a `SystemPackageManager`.
pub trait SystemPackageManager: KeyRegistrar + IndexRefresher + PackageInstaller {}

/// Blanket implementation for the composite.
impl<T> SystemPackageManager for T where T: KeyRegistrar + IndexRefresher + PackageInstaller {}

/// Append-only access to a plain-text source list file.
pub trait SourceListStore {
    /// Whether the trimmed line already appears in the file. A missing file
    /// contains nothing.
    fn contains_line(&self, file: &Path, line: &str) -> Result<bool, StepError>;

    /// Append the line (newline-terminated), creating the file if missing.
    fn append_line(&self, file: &Path, line: &str) -> Result<(), StepError>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts step-log emission so the engine can run without depending on
/// the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// A step is about to execute.
    fn begin(&self, description: &str);

    /// The step finished; emit its log line.
    fn complete(&self, description: &str, result: &StepResult);
}

// ── Config Store Port ─────────────────────────────────────────────────────────

/// Abstracts configuration persistence (load/save).
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    fn load(&self) -> Result<ProvisConfig>;

    /// Persist the given configuration.
    fn save(&self, config: &ProvisConfig) -> Result<()>;

    /// Path of the backing file.
    fn path(&self) -> Result<std::path::PathBuf>;
}
