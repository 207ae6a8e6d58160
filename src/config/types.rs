//! Configuration Types
//!
//! All configuration structures with sensible defaults.

use serde::{Deserialize, Serialize};

use crate::ai::provider::ProviderConfig;
use crate::constants::{collection, llm, network};
use crate::prd::DevelopmentMode;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// LLM provider settings
    pub llm: LlmConfig,

    /// PRD generation settings
    pub generation: GenerationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: LlmConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> crate::types::Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(crate::types::PrdError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(crate::types::PrdError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(crate::types::PrdError::Config(
                "LLM max_tokens must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

/// The API key is deliberately absent: it comes from `OPENAI_API_KEY` or the
/// `--api-key` flag and is never written to a config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("openai", "ollama")
    pub provider: String,

    /// Model name
    pub model: String,

    /// Endpoint override; falls back to `OPENAI_BASE_URL`, then the provider default
    pub api_base: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Temperature for LLM generation
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: llm::DEFAULT_PROVIDER.to_string(),
            model: llm::DEFAULT_OPENAI_MODEL.to_string(),
            api_base: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: 0.7,
            max_tokens: llm::DEFAULT_MAX_TOKENS,
        }
    }
}

impl LlmConfig {
    /// Build a provider configuration, leaving the key to the provider's
    /// environment lookup unless one is given explicitly.
    ///
    /// The OpenAI default model is not forwarded to Ollama, which then picks
    /// its own default.
    pub fn to_provider_config(&self, api_key: Option<String>) -> ProviderConfig {
        let model = if self.provider == "ollama" && self.model == llm::DEFAULT_OPENAI_MODEL {
            None
        } else {
            Some(self.model.clone())
        };

        ProviderConfig {
            provider: self.provider.clone(),
            model,
            timeout_secs: self.timeout_secs,
            temperature: self.temperature,
            api_key,
            api_base: self.api_base.clone(),
            max_tokens: self.max_tokens,
        }
    }
}

// =============================================================================
// Generation Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Mode used when `generate` is called without `--mode`
    pub default_mode: DevelopmentMode,

    /// Output language requested from the model
    pub language: String,

    /// Answers required before `chat` may finish early
    pub min_user_answers: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_mode: DevelopmentMode::Sprint,
            language: "Traditional Chinese".to_string(),
            min_user_answers: collection::MIN_USER_ANSWERS,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.generation.min_user_answers, 4);
    }

    #[test]
    fn test_validate_temperature() {
        let mut config = Config::default();
        config.llm.temperature = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_timeout() {
        let mut config = Config::default();
        config.llm.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_provider_config_carries_overrides() {
        let mut config = LlmConfig::default();
        config.api_base = Some("http://proxy.local/v1".to_string());

        let provider = config.to_provider_config(Some("sk-test".to_string()));
        assert_eq!(provider.provider, "openai");
        assert_eq!(provider.model.as_deref(), Some("gpt-4o"));
        assert_eq!(provider.api_base.as_deref(), Some("http://proxy.local/v1"));
        assert_eq!(provider.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_ollama_ignores_openai_default_model() {
        let config = LlmConfig {
            provider: "ollama".to_string(),
            ..Default::default()
        };
        assert_eq!(config.to_provider_config(None).model, None);

        let config = LlmConfig {
            provider: "ollama".to_string(),
            model: "qwen2.5:7b".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.to_provider_config(None).model.as_deref(),
            Some("qwen2.5:7b")
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[llm]
model = "gpt-4o-mini"

[generation]
default_mode = "bdd"
"#,
        )
        .unwrap();

        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.generation.default_mode, DevelopmentMode::Bdd);
        assert_eq!(config.generation.language, "Traditional Chinese");
    }
}
