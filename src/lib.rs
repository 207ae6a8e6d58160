//! prdkit - Conversational PRD Assistant
//!
//! Collects product requirements through a fixed nine-question interview,
//! extracts them into a structured record, and asks a language model to
//! draft PRDs in one of four development modes.
//!
//! ## Core Features
//!
//! - **Requirement Extractor**: transcript to a fixed-shape record, tolerant
//!   of fenced, chatty or slightly broken JSON from the model
//! - **Response Segmenter**: one reply split into MVP, standard and ideal
//!   versions plus a comparison table
//! - **Review**: completeness review and a 13-item upgrade checklist
//! - **Providers**: OpenAI-compatible endpoints and local Ollama
//!
//! ## Quick Start
//!
//! ```ignore
//! use prdkit::{ProviderConfig, RequirementExtractor, create_provider, segment};
//!
//! let provider = create_provider(&ProviderConfig::default())?;
//! let requirements = RequirementExtractor::new(provider).extract(&transcript).await;
//! let bundle = segment(&model_reply);
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: provider abstraction, prompt builder, JSON recovery
//! - [`prd`]: the PRD pipeline
//! - [`config`]: layered configuration
//! - [`types`]: data model and errors

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod prd;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{Config, ConfigLoader, GenerationConfig, LlmConfig};

pub use types::{
    ConversationTurn, ErrorCategory, PrdError, Result, Role, StructuredRequirements, Transcript,
    VersionBundle, is_complete,
};

pub use ai::{LlmProvider, LlmResponse, ProviderConfig, SharedProvider, create_provider};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use prd::{
    DevelopmentMode, PrdGenerator, PrdReviewer, RequirementCoordinator, RequirementExtractor,
    UpgradeChecklist, VersionGenerator, combined_document, segment,
};
