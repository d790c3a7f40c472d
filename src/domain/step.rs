//! Step and action types — the declarative unit of provisioning.
//!
//! A [`Step`] pairs a unique name and description with one [`Action`] and a
//! continue-on-failure policy. Steps are immutable once constructed; plan
//! files deserialize straight into them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which installer backend an `install-packages` step targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    /// Native system packages (apt-get / dpkg).
    Apt,
    /// Interpreted-language modules (pip).
    Pip,
}

/// One provisioning action, tagged by kind in plan files.
///
/// ```yaml
/// kind: append-source-line
/// file: /etc/apt/sources.list
/// line: "deb https://www.deb-multimedia.org jessie main non-free"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Action {
    /// Download a URL to a local path. The destination only ever holds a
    /// fully-written artifact; an optional SHA-256 digest is verified both
    /// after download and by the idempotence probe.
    Fetch {
        url: String,
        dest: PathBuf,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sha256: Option<String>,
    },

    /// Register a trust key from a local file with the package manager.
    RegisterKey {
        key_file: PathBuf,
        /// Key id searched for in the trust store listing (idempotence probe).
        key_id: String,
        /// Delete the key file once registration succeeds.
        #[serde(default = "default_true")]
        remove_after: bool,
    },

    /// Append one line to a plain-text source list, creating the file if
    /// missing. Skipped when the trimmed line is already present.
    AppendSourceLine { file: PathBuf, line: String },

    /// Refresh the package index. Never "already satisfied".
    RefreshIndex,

    /// Install a package set atomically — the whole set shares one result.
    InstallPackages {
        manager: PackageManagerKind,
        packages: Vec<String>,
    },
}

fn default_true() -> bool {
    true
}

impl Action {
    /// Short kind label used in plan listings.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "fetch",
            Self::RegisterKey { .. } => "register-key",
            Self::AppendSourceLine { .. } => "append-source-line",
            Self::RefreshIndex => "refresh-index",
            Self::InstallPackages { .. } => "install-packages",
        }
    }
}

/// One declarative provisioning step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Unique name within a plan, e.g. `install-native-packages`.
    pub name: String,
    /// Human-readable description used for the step log.
    pub description: String,
    #[serde(flatten)]
    pub action: Action,
    /// When `true`, a failure of this step does not abort the run.
    #[serde(default)]
    pub continue_on_failure: bool,
}

impl Step {
    /// Construct a fatal-on-failure step.
    #[must_use]
    pub fn new(name: &str, description: &str, action: Action) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            action,
            continue_on_failure: false,
        }
    }

    /// Mark this step as non-fatal.
    #[must_use]
    pub fn continue_on_failure(mut self) -> Self {
        self.continue_on_failure = true;
        self
    }
}
