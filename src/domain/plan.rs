//! Plan construction and validation, plus the built-in media-toolchain plan.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::Deserialize;

use crate::domain::error::PlanError;
use crate::domain::step::{Action, PackageManagerKind, Step};

/// Step names: lowercase alphanumerics and inner hyphens, 1–63 chars.
/// Same shape the rest of the tooling uses for machine-safe identifiers.
#[allow(clippy::expect_used)] // compile-time constant pattern
pub static STEP_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").expect("valid regex")
});

/// A validated, ordered, non-empty sequence of steps with unique names.
#[derive(Debug, Clone)]
pub struct Plan {
    steps: Vec<Step>,
}

/// Serde shape of a YAML plan file: a top-level `steps` list.
#[derive(Debug, Deserialize)]
pub struct PlanFile {
    pub steps: Vec<Step>,
}

impl Plan {
    /// Validate and seal a step list.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] if the list is empty, a name is malformed, or a
    /// name repeats.
    pub fn new(steps: Vec<Step>) -> Result<Self> {
        if steps.is_empty() {
            return Err(PlanError::Empty.into());
        }
        let mut seen = HashSet::new();
        for step in &steps {
            if !STEP_NAME_RE.is_match(&step.name) {
                return Err(PlanError::InvalidName(step.name.clone()).into());
            }
            if !seen.insert(step.name.clone()) {
                return Err(PlanError::DuplicateName(step.name.clone()).into());
            }
        }
        Ok(Self { steps })
    }

    /// Parse and validate a YAML plan document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or the step list is invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: PlanFile = serde_yaml::from_str(yaml)?;
        Self::new(file.steps)
    }

    /// Steps in declared order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The built-in plan: prepare a Debian-family host for the
    /// audio/text-alignment toolchain.
    ///
    /// `strict_refresh` makes the index refresh fatal instead of the default
    /// keep-going policy (a stale index does not preclude cache installs).
    #[must_use]
    #[allow(clippy::expect_used)] // the built-in plan is statically valid
    pub fn media_toolchain(strict_refresh: bool) -> Self {
        let key_file = PathBuf::from("/tmp/provis/deb-multimedia-key.asc");

        let refresh = Step::new(
            "refresh-package-index",
            "Refreshing package index",
            Action::RefreshIndex,
        );
        let refresh = if strict_refresh {
            refresh
        } else {
            refresh.continue_on_failure()
        };

        let steps = vec![
            Step::new(
                "fetch-repo-key",
                "Downloading multimedia repository signing key",
                Action::Fetch {
                    url: "https://www.deb-multimedia.org/key.asc".to_string(),
                    dest: key_file.clone(),
                    sha256: None,
                },
            ),
            Step::new(
                "register-repo-key",
                "Registering multimedia repository signing key",
                Action::RegisterKey {
                    key_file,
                    key_id: "5C808C2B65558117".to_string(),
                    remove_after: true,
                },
            ),
            Step::new(
                "append-repo-source",
                "Adding multimedia repository to the source list",
                Action::AppendSourceLine {
                    file: PathBuf::from("/etc/apt/sources.list"),
                    line: "deb https://www.deb-multimedia.org jessie main non-free".to_string(),
                },
            ),
            refresh,
            Step::new(
                "install-native-packages",
                "Installing native audio and XML libraries",
                Action::InstallPackages {
                    manager: PackageManagerKind::Apt,
                    packages: [
                        "ffmpeg",
                        "espeak",
                        "libespeak-dev",
                        "libxml2-dev",
                        "libxslt1-dev",
                    ]
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                },
            ),
            Step::new(
                "install-python-modules",
                "Installing Python modules",
                Action::InstallPackages {
                    manager: PackageManagerKind::Pip,
                    packages: ["numpy", "lxml", "beautifulsoup4"]
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                },
            ),
        ];

        Self::new(steps).expect("built-in plan is valid")
    }
}
