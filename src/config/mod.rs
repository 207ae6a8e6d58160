//! Configuration Management
//!
//! Hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (`<config dir>/prdkit/config.toml`)
//! 3. Project config (`.prdkit/config.toml`)
//! 4. Environment variables (`PRDKIT_*`)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
