//! `provis doctor` — verify the external collaborators before a run.

use std::path::Path;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::doctor::probe_collaborators;
use crate::domain::health::{HostChecks, collect_issues};
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner};
use crate::infra::sources::probe_source_list;
use crate::output::Renderer;

/// Path the built-in plan appends to; the doctor probes the same file.
const SOURCES_LIST: &str = "/etc/apt/sources.list";

/// Probe the host and render the results.
///
/// # Errors
///
/// Returns an error only if JSON rendering fails; probe failures show up as
/// issues, not errors.
pub async fn run(ctx: &AppContext) -> Result<()> {
    let runner = TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT);
    let collaborators = probe_collaborators(&runner, &ctx.config.python.pip_program).await;
    let sources = probe_source_list(Path::new(SOURCES_LIST));
    let checks = HostChecks {
        collaborators,
        sources,
    };
    let issues = collect_issues(&checks);

    match ctx.renderer() {
        Renderer::Human(renderer) => renderer.render_doctor(&checks, &issues),
        Renderer::Json(renderer) => renderer.render_doctor(&checks, &issues)?,
    }
    Ok(())
}
