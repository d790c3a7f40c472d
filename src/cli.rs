//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Idempotent provisioning for the media-processing toolchain
#[derive(Parser)]
#[command(
    name = "provis",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Execute the provisioning plan against this host
    Run(commands::run::RunArgs),

    /// Show the resolved plan without executing it
    Plan(commands::plan::PlanArgs),

    /// Check the external collaborators (apt-get, curl, pip, source list)
    Doctor,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command and return the process exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails before a run report exists
    /// (bad plan file, unreadable config, prompt failure).
    pub async fn run(self) -> Result<i32> {
        let Cli {
            json,
            quiet,
            no_color,
            command,
        } = self;

        if let Command::Version = command {
            commands::version::run(json);
            return Ok(0);
        }

        let result = Self::dispatch(command, &AppFlags {
            no_color,
            quiet,
            json,
        })
        .await;

        // In JSON mode, failures become a machine-readable error object on
        // stdout instead of an anyhow chain on stderr.
        match result {
            Err(e) if json => {
                println!(
                    "{}",
                    crate::output::json::format_error(&format!("{e:#}"), "command-failed")?
                );
                Ok(1)
            }
            other => other,
        }
    }

    async fn dispatch(command: Command, flags: &AppFlags) -> Result<i32> {
        let ctx = AppContext::new(flags)?;
        match command {
            Command::Run(args) => commands::run::run(&ctx, &args).await,
            Command::Plan(args) => {
                commands::plan::run(&ctx, &args)?;
                Ok(0)
            }
            Command::Doctor => {
                commands::doctor::run(&ctx).await?;
                Ok(0)
            }
            Command::Config(cmd) => {
                commands::config::run(&ctx, cmd)?;
                Ok(0)
            }
            Command::Version => unreachable!("handled above"),
        }
    }
}
