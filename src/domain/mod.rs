//! Domain layer — pure types, validation, and diagnostics.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod health;
pub mod plan;
pub mod report;
pub mod step;

#[allow(unused_imports)]
pub use config::{ProvisConfig, apply_config_value, validate_config_key};
#[allow(unused_imports)]
pub use error::{ConfigError, FailureClass, PlanError, StepError};
#[allow(unused_imports)]
pub use health::{CollaboratorChecks, HostChecks, SourceListChecks, collect_issues};
#[allow(unused_imports)]
pub use plan::Plan;
#[allow(unused_imports)]
pub use report::{RunOutcome, RunReport, StepOutcome, StepResult};
#[allow(unused_imports)]
pub use step::{Action, PackageManagerKind, Step};
