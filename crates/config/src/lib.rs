//! Configuration management for the FAQ agent
//!
//! Supports loading configuration from:
//! - YAML/JSON files
//! - Environment variables (FAQ_AGENT_ prefix, `__` section separator)
//!
//! Every field has an explicit default, so a missing or partial file
//! is never rejected; it only narrows what the defaults cover.

pub mod settings;

pub use settings::{
    load_settings, CacheSettings, ContextSettings, GateSettings, GuardrailSettings,
    HybridSettings, InputSettings, LlmSettings, MergeWeights, NormalizeSettings, RerankSettings,
    RetrievalSettings, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

impl From<ConfigError> for faq_agent_core::Error {
    fn from(err: ConfigError) -> Self {
        faq_agent_core::Error::Config(err.to_string())
    }
}
