//! CLI Common Utilities
//!
//! Shared initialization for commands that talk to a model, plus file
//! helpers that attach the path to every error.

use std::path::Path;

use tracing::debug;

use crate::ai::{SharedProvider, create_provider};
use crate::cli::ui::Output;
use crate::config::{Config, ConfigLoader};
use crate::types::{PrdError, Result, StructuredRequirements};

/// Global LLM flags; each one overrides the loaded configuration
#[derive(Debug, Clone, Default)]
pub struct LlmOverrides {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub api_key: Option<String>,
}

impl LlmOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(provider) = &self.provider {
            config.llm.provider = provider.to_lowercase();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(api_base) = &self.api_base {
            config.llm.api_base = Some(api_base.clone());
        }
    }
}

/// Command execution context
///
/// Created via `CommandContext::load()` for commands that call a model.
pub struct CommandContext {
    pub config: Config,
    pub provider: SharedProvider,
    pub output: Output,
}

impl CommandContext {
    /// Load config, apply the CLI overrides and build the provider.
    pub fn load(overrides: &LlmOverrides, quiet: bool) -> Result<Self> {
        let mut config = ConfigLoader::load()?;
        overrides.apply(&mut config);
        config.validate()?;

        let provider_config = config.llm.to_provider_config(overrides.api_key.clone());
        let provider = create_provider(&provider_config)?;
        debug!(
            "Using provider {} with model {}",
            provider.name(),
            provider.model()
        );

        Ok(Self {
            config,
            provider,
            output: Output::new(quiet),
        })
    }

    pub fn language(&self) -> &str {
        &self.config.generation.language
    }
}

pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| PrdError::Validation(format!("Cannot read {}: {}", path.display(), e)))
}

/// Write `content`, creating parent directories as needed.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a requirements JSON file, tolerating the same shape variations the
/// extractor accepts from the model.
pub fn read_requirements(path: &Path) -> Result<StructuredRequirements> {
    let text = read_text(path)?;
    let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
        PrdError::Validation(format!("{} is not valid JSON: {}", path.display(), e))
    })?;

    StructuredRequirements::from_json_value(&value).ok_or_else(|| {
        PrdError::Validation(format!(
            "{} must contain a JSON object with stage_0, stage_1 and stage_2",
            path.display()
        ))
    })
}

pub fn write_requirements(path: &Path, requirements: &StructuredRequirements) -> Result<()> {
    write_text(path, &serde_json::to_string_pretty(requirements)?)
}
