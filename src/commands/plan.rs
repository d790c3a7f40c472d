//! `provis plan` — show the resolved plan without executing it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::commands::resolve_plan;
use crate::output::Renderer;

/// Arguments for the plan command.
#[derive(Args)]
pub struct PlanArgs {
    /// YAML plan file (defaults to the built-in media-toolchain plan)
    #[arg(long, value_name = "FILE")]
    pub plan: Option<PathBuf>,

    /// Show the plan with a fatal package-index refresh (built-in plan only)
    #[arg(long)]
    pub strict_refresh: bool,
}

/// Render the resolved plan.
///
/// # Errors
///
/// Returns an error if the plan file cannot be read or is invalid.
pub fn run(ctx: &AppContext, args: &PlanArgs) -> Result<()> {
    let plan = resolve_plan(args.plan.as_deref(), args.strict_refresh)?;
    match ctx.renderer() {
        Renderer::Human(renderer) => renderer.render_plan(&plan),
        Renderer::Json(renderer) => renderer.render_plan(&plan)?,
    }
    Ok(())
}
