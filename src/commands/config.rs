//! `provis config` — inspect and edit the persisted configuration.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::domain::config::apply_config_value;
use crate::infra::config::YamlConfigStore;
use crate::output::Renderer;

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the current configuration
    Show,
    /// Set a configuration value, e.g. `provis config set fetch.retries 3`
    Set {
        /// Setting key (see `provis config show` for the list)
        key: String,
        /// New value
        value: String,
    },
}

/// Run a config subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written, or the
/// key/value pair is invalid.
pub fn run(ctx: &AppContext, cmd: ConfigCommand) -> Result<()> {
    let store = YamlConfigStore;
    match cmd {
        ConfigCommand::Show => {
            let path = store.path()?.display().to_string();
            match ctx.renderer() {
                Renderer::Human(renderer) => renderer.render_config(&ctx.config, &path),
                Renderer::Json(renderer) => renderer.render_config(&ctx.config, &path)?,
            }
        }
        ConfigCommand::Set { key, value } => {
            let mut config = store.load()?;
            apply_config_value(&mut config, &key, &value)?;
            store.save(&config)?;
            ctx.output.success(&format!("Set {key} = {value}"));
        }
    }
    Ok(())
}
