//! Config Command
//!
//! Manage prdkit configuration.
//!
//! Usage:
//!   prdkit config show [--json]
//!   prdkit config path
//!   prdkit config init [--global] [--force]
//!   prdkit config check

use crate::ai::LlmProvider;
use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::config::ConfigLoader;
use crate::types::{PrdError, Result};

/// Show the merged effective configuration
pub fn show(as_json: bool) -> Result<()> {
    ConfigLoader::show_config(as_json)
}

pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

pub fn init(global: bool, force: bool, quiet: bool) -> Result<()> {
    let out = Output::new(quiet);

    let (dir, config_path) = if global {
        let dir = ConfigLoader::init_global(force)?;
        let path = dir.join("config.toml");
        (dir, path)
    } else {
        (
            ConfigLoader::init_project(force)?,
            ConfigLoader::project_config_path(),
        )
    };

    let scope = if global { "global" } else { "project" };
    out.success(&format!("Initialized {} configuration", scope));
    out.info(&format!("Directory: {}", dir.display()));
    out.info(&format!("Config:    {}", config_path.display()));
    Ok(())
}

/// Verify that the configured provider answers before a long session starts.
pub async fn check(ctx: CommandContext) -> Result<()> {
    ctx.output.info(&format!(
        "Checking {} (model: {})",
        ctx.provider.name(),
        ctx.provider.model()
    ));

    let message = check_provider(ctx.provider.as_ref()).await?;
    ctx.output.success(&message);
    Ok(())
}

async fn check_provider(provider: &dyn LlmProvider) -> Result<String> {
    if provider.health_check().await? {
        Ok(format!("{} is reachable", provider.name()))
    } else {
        Err(PrdError::Config(format!(
            "{} is not reachable with model {}; check llm.api_base and the API key",
            provider.name(),
            provider.model()
        )))
    }
}
