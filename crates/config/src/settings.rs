//! Main settings module
//!
//! The section layout mirrors the pipeline config file shipped with
//! the knowledge base (`config/pipeline.yaml`); JSON files with the
//! same structure parse unchanged.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalSettings,

    /// Rerank configuration
    #[serde(default)]
    pub rerank: RerankSettings,

    /// Confidence gate thresholds
    #[serde(default)]
    pub confidence_gate: GateSettings,

    /// Result cache TTLs
    #[serde(default)]
    pub cache: CacheSettings,

    /// Input normalization and context fusion
    #[serde(default)]
    pub input: InputSettings,

    /// Pre-retrieval guardrails
    #[serde(default)]
    pub guardrails: GuardrailSettings,

    /// Answer generation surface (refusal template)
    #[serde(default)]
    pub llm: LlmSettings,
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalSettings {
    /// Path to the JSONL knowledge base
    #[serde(default = "default_index_source")]
    pub index_source: String,

    /// Hybrid shortlist settings
    #[serde(default)]
    pub hybrid: HybridSettings,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            index_source: default_index_source(),
            hybrid: HybridSettings::default(),
        }
    }
}

/// Hybrid shortlist sizes and fusion weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridSettings {
    /// Number of candidates from the BM25 signal
    #[serde(default = "default_signal_top_k")]
    pub bm25_top_k: usize,

    /// Number of candidates from the overlap ("vector") signal
    #[serde(default = "default_signal_top_k")]
    pub vector_top_k: usize,

    /// Signal weights used by the reranker
    #[serde(default)]
    pub merge_weights: MergeWeights,
}

impl Default for HybridSettings {
    fn default() -> Self {
        Self {
            bm25_top_k: default_signal_top_k(),
            vector_top_k: default_signal_top_k(),
            merge_weights: MergeWeights::default(),
        }
    }
}

/// Signal weights for score fusion
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MergeWeights {
    #[serde(default = "default_vector_weight")]
    pub vector: f64,

    #[serde(default = "default_bm25_weight")]
    pub bm25: f64,
}

impl Default for MergeWeights {
    fn default() -> Self {
        Self {
            vector: default_vector_weight(),
            bm25: default_bm25_weight(),
        }
    }
}

/// Rerank configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RerankSettings {
    /// Additive boost for candidates carrying an intent tag
    #[serde(default)]
    pub intent_boost: f64,

    /// Post-rerank truncation count
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RerankSettings {
    fn default() -> Self {
        Self {
            intent_boost: 0.0,
            top_k: default_top_k(),
        }
    }
}

/// Confidence gate thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GateSettings {
    /// Minimum fused score of the top candidate
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Minimum top1-top2 score gap before the conflict rule applies
    #[serde(default = "default_min_margin")]
    pub min_margin: f64,

    /// Reject near-ties whose leading candidates disagree on intent
    #[serde(default = "default_true")]
    pub conflict_reject: bool,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            min_margin: default_min_margin(),
            conflict_reject: true,
        }
    }
}

/// Result cache TTLs (seconds)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl_sec")]
    pub answer_cache_ttl_sec: u64,

    #[serde(default = "default_cache_ttl_sec")]
    pub retrieval_cache_ttl_sec: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            answer_cache_ttl_sec: default_cache_ttl_sec(),
            retrieval_cache_ttl_sec: default_cache_ttl_sec(),
        }
    }
}

/// Input handling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSettings {
    #[serde(default)]
    pub normalize: NormalizeSettings,

    #[serde(default)]
    pub context: ContextSettings,
}

/// Input normalization toggles
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NormalizeSettings {
    /// Lowercase, collapse whitespace and trim before any matching
    #[serde(default = "default_true")]
    pub trim_spaces: bool,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self { trim_spaces: true }
    }
}

/// Context fusion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextSettings {
    /// Marker substrings signalling a referential query ("那个"...)
    #[serde(default)]
    pub referential_tokens: Vec<String>,

    /// Queries shorter than this (in characters) trigger fusion
    #[serde(default = "default_min_query_len")]
    pub min_query_len_for_context: usize,

    /// Prior user turns folded into the query; <= 0 keeps all of them
    #[serde(default = "default_max_turns")]
    pub max_turns: i64,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            referential_tokens: Vec::new(),
            min_query_len_for_context: default_min_query_len(),
            max_turns: default_max_turns(),
        }
    }
}

/// Pre-retrieval guardrails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailSettings {
    /// Substrings vetoed in configured order
    #[serde(default)]
    pub sensitive_keywords: Vec<String>,

    /// "refuse" additionally vetoes empty queries
    #[serde(default = "default_out_of_scope_policy")]
    pub out_of_scope_policy: String,
}

impl Default for GuardrailSettings {
    fn default() -> Self {
        Self {
            sensitive_keywords: Vec::new(),
            out_of_scope_policy: default_out_of_scope_policy(),
        }
    }
}

/// Answer generation surface consumed by the core
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Text returned on refusal, trimmed before use
    #[serde(default)]
    pub refuse_template: String,
}

fn default_index_source() -> String {
    "data/qa_pairs.jsonl".to_string()
}

fn default_signal_top_k() -> usize {
    20
}

fn default_vector_weight() -> f64 {
    0.6
}

fn default_bm25_weight() -> f64 {
    0.4
}

fn default_top_k() -> usize {
    5
}

fn default_min_confidence() -> f64 {
    0.55
}

fn default_min_margin() -> f64 {
    0.05
}

fn default_cache_ttl_sec() -> u64 {
    900
}

fn default_min_query_len() -> usize {
    6
}

fn default_max_turns() -> i64 {
    4
}

fn default_out_of_scope_policy() -> String {
    "refuse".to_string()
}

fn default_true() -> bool {
    true
}

/// Load settings from an optional file and the environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (FAQ_AGENT_ prefix, `__` separator)
/// 2. The given YAML/JSON file, if any
/// 3. Per-field defaults
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        builder = builder.add_source(File::from(path));
    }

    builder = builder.add_source(
        Environment::with_prefix("FAQ_AGENT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    Ok(settings)
}
