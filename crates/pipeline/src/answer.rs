//! Answer formatting

use faq_agent_core::{AnswerPayload, RankedCandidate};

/// Format the final payload from the top candidate, or a refusal when
/// the shortlist is empty. The stored answer is restated as the basis
/// line so the client can render answer and citation text separately.
pub fn build_answer(candidates: &[RankedCandidate], refuse_template: &str) -> AnswerPayload {
    let Some(top) = candidates.first() else {
        return AnswerPayload::refusal(refuse_template);
    };

    AnswerPayload {
        answer: format!("答复：{}\n依据：{}\n生效时间：", top.answer, top.answer),
        citations: vec![top.id.clone()],
        confidence: top.fused,
        fallback: false,
    }
}
