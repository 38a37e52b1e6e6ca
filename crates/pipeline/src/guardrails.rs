//! Pre-retrieval guardrails
//!
//! A veto here is terminal: retrieval never sees the query.

use faq_agent_core::AnswerPayload;

/// Veto the (already normalized) query before retrieval runs
///
/// Keywords are checked in configured order with first-match
/// short-circuit. Under the "refuse" out-of-scope policy an empty
/// query is vetoed as well. `None` means the pipeline proceeds.
pub fn apply_guardrails(
    query: &str,
    refuse_template: &str,
    sensitive_keywords: &[String],
    out_of_scope_policy: &str,
) -> Option<AnswerPayload> {
    for keyword in sensitive_keywords {
        if !keyword.is_empty() && query.contains(keyword.as_str()) {
            tracing::info!(keyword = %keyword, "query vetoed by sensitive keyword");
            return Some(AnswerPayload::refusal(refuse_template));
        }
    }

    if out_of_scope_policy == "refuse" && query.trim().is_empty() {
        return Some(AnswerPayload::refusal(refuse_template));
    }

    None
}
