//! Decision core of the FAQ agent
//!
//! Sequences one request end to end: normalize, guardrail veto,
//! context fusion, cache lookup, hybrid retrieval, score fusion,
//! confidence gating and answer formatting. Every degenerate input
//! resolves to a refusal payload; `respond` never fails.

pub mod answer;
pub mod cache;
pub mod context;
pub mod gate;
pub mod guardrails;
pub mod pipeline;

pub use answer::build_answer;
pub use cache::TtlCache;
pub use context::fuse_query;
pub use gate::{passes_confidence_gate, GateThresholds};
pub use guardrails::apply_guardrails;
pub use pipeline::ChatPipeline;
