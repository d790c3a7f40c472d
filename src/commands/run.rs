//! `provis run` — execute the provisioning plan.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::provision::{ProvisionService, RunnerOptions};
use crate::commands::resolve_plan;
use crate::infra::apt::AptPackageManager;
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner};
use crate::infra::fetch::CurlFetcher;
use crate::infra::pip::PipInstaller;
use crate::infra::sources::FsSourceList;
use crate::output::{OutputContext, Renderer, reporter::TerminalReporter};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// YAML plan file (defaults to the built-in media-toolchain plan)
    #[arg(long, value_name = "FILE")]
    pub plan: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Make the package-index refresh fatal (built-in plan only)
    #[arg(long)]
    pub strict_refresh: bool,

    /// Override the fetch retry budget for this run
    #[arg(long, value_name = "N")]
    pub fetch_retries: Option<u32>,
}

/// Run the provisioning plan and return the process exit code.
///
/// # Errors
///
/// Returns an error for failures before execution starts (bad plan file,
/// prompt failure). Step failures are reported through the run report and
/// its exit code instead.
pub async fn run(ctx: &AppContext, args: &RunArgs) -> Result<i32> {
    let plan = resolve_plan(args.plan.as_deref(), args.strict_refresh)?;

    if !(args.yes || ctx.non_interactive) {
        let prompt = format!("Apply {} provisioning step(s) to this host?", plan.len());
        if !ctx.confirm(&prompt, true)? {
            ctx.output.info("Aborted.");
            return Ok(1);
        }
    }

    let mut config = ctx.config.clone();
    if let Some(retries) = args.fetch_retries {
        config.fetch.retries = retries;
    }
    let install_timeout = Duration::from_secs(config.install.timeout_secs);

    let apt = AptPackageManager::new(TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT), install_timeout);
    let pip = PipInstaller::new(
        TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT),
        &config.python.pip_program,
        install_timeout,
    );
    let fetcher = CurlFetcher::new(
        TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT),
        Duration::from_secs(config.fetch.attempt_timeout_secs),
    );
    let sources = FsSourceList;

    // In JSON mode the step log must not interleave with the report on
    // stdout; failures still reach stderr.
    let log_ctx;
    let reporter = if ctx.is_json() {
        log_ctx = OutputContext::new(true, true);
        TerminalReporter::new(&log_ctx)
    } else {
        TerminalReporter::new(&ctx.output)
    };

    let service = ProvisionService::new(
        &apt,
        &pip,
        &fetcher,
        &sources,
        &reporter,
        RunnerOptions::from_config(&config),
    );
    let report = service.run(&plan).await;

    match ctx.renderer() {
        Renderer::Human(renderer) => {
            if !ctx.output.quiet {
                println!();
            }
            renderer.render_report_summary(&report);
        }
        Renderer::Json(renderer) => renderer.render_report(&report)?,
    }

    Ok(report.exit_code())
}
