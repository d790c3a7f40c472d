//! Command implementations

pub mod config;
pub mod doctor;
pub mod plan;
pub mod run;
pub mod version;

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::plan::Plan;

/// Resolve the plan to operate on: a YAML file when given, otherwise the
/// built-in media-toolchain plan. `strict_refresh` only affects the
/// built-in plan — a plan file spells out its own policies.
pub fn resolve_plan(plan_file: Option<&Path>, strict_refresh: bool) -> Result<Plan> {
    match plan_file {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read plan file {}", path.display()))?;
            Plan::from_yaml(&yaml)
                .with_context(|| format!("invalid plan file {}", path.display()))
        }
        None => Ok(Plan::media_toolchain(strict_refresh)),
    }
}
