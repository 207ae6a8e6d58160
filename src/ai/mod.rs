//! AI Integration Layer
//!
//! Model access for the PRD pipeline: providers, prompt construction and
//! recovery of structured data from free-text replies.

pub mod prompt;
pub mod provider;
pub mod validation;

pub use prompt::{PromptBuilder, PromptSection, PromptTemplates};
pub use provider::{
    LlmProvider, LlmResponse, OllamaProvider, OpenAiProvider, ProviderConfig, ResponseMetadata,
    ResponseTiming, SharedProvider, TokenUsage, create_provider,
};
pub use validation::{
    extract_json_from_response, extract_json_with_repair_status, json_candidate, parse_or_repair,
};
