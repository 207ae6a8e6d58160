//! Global Constants
//!
//! Centralized constants for configuration and tuning.

/// Requirement collection constants
pub mod collection {
    /// Phrase the coordinator uses to announce that all questions are answered
    pub const COMPLETION_MARKER: &str = "需求收集完成";

    /// Minimum number of user answers before a PRD may be generated directly
    pub const MIN_USER_ANSWERS: usize = 4;
}

/// Version segmentation constants
pub mod segmentation {
    /// Header-cell phrases that identify a version comparison table
    pub const COMPARISON_TABLE_MARKERS: [&str; 2] = ["比較項目", "comparison item"];
}

/// Fallback text for unanswered fields in requirement context blocks
pub const UNDEFINED_FIELD: &str = "未定義";

/// LLM defaults
pub mod llm {
    /// Default provider
    pub const DEFAULT_PROVIDER: &str = "openai";

    /// Default model for the OpenAI-compatible provider
    pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

    /// Default OpenAI-compatible endpoint
    pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";

    /// Default local Ollama endpoint
    pub const DEFAULT_OLLAMA_API_BASE: &str = "http://localhost:11434";

    /// Default model for Ollama
    pub const DEFAULT_OLLAMA_MODEL: &str = "llama3:latest";

    /// Environment variable holding the OpenAI API key
    pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

    /// Environment variable overriding the OpenAI base URL
    pub const API_BASE_ENV: &str = "OPENAI_BASE_URL";

    /// Maximum tokens to generate (PRDs are long)
    pub const DEFAULT_MAX_TOKENS: usize = 8192;
}

/// HTTP/Network constants
pub mod network {
    /// Default request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
}
