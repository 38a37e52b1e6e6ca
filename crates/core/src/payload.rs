//! Final answer payload

use serde::{Deserialize, Serialize};

/// Unit returned to collaborators and stored in the answer cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerPayload {
    /// Final answer text (or the refusal template)
    pub answer: String,
    /// Knowledge item IDs backing the answer; empty on refusal
    pub citations: Vec<String>,
    /// Gating score of the winning candidate; 0.0 on refusal
    pub confidence: f64,
    /// True iff this is a refusal/guardrail response
    pub fallback: bool,
}

impl AnswerPayload {
    /// Refusal payload built from the configured template
    pub fn refusal(template: &str) -> Self {
        Self {
            answer: template.trim().to_string(),
            citations: Vec::new(),
            confidence: 0.0,
            fallback: true,
        }
    }
}
