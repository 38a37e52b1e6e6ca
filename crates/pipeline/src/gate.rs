//! Confidence gate
//!
//! Accept/reject decision over the reranked shortlist. A tight margin
//! alone does not reject: it only bites when the two leading
//! candidates also carry differing, non-empty intent tags. A near-tie
//! between same-intent candidates is accepted, since either answer is
//! likely equivalent.

use faq_agent_core::RankedCandidate;

/// Gate thresholds
#[derive(Debug, Clone, Copy)]
pub struct GateThresholds {
    /// Minimum fused score of the top candidate
    pub min_confidence: f64,
    /// Minimum top1-top2 gap before the conflict rule applies
    pub min_margin: f64,
    /// Enable the margin-plus-intent-conflict rejection
    pub conflict_reject: bool,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            min_confidence: 0.55,
            min_margin: 0.05,
            conflict_reject: true,
        }
    }
}

/// Returns `(accepted, confidence)`; confidence is the top fused
/// score, or 0.0 when the shortlist is empty.
pub fn passes_confidence_gate(
    candidates: &[RankedCandidate],
    thresholds: GateThresholds,
) -> (bool, f64) {
    let Some(top1) = candidates.first() else {
        return (false, 0.0);
    };

    if top1.fused < thresholds.min_confidence {
        return (false, top1.fused);
    }

    if let Some(top2) = candidates.get(1) {
        if top1.fused - top2.fused < thresholds.min_margin
            && thresholds.conflict_reject
            && intents_conflict(top1.intent.as_deref(), top2.intent.as_deref())
        {
            tracing::debug!(
                margin = top1.fused - top2.fused,
                top1_intent = ?top1.intent,
                top2_intent = ?top2.intent,
                "near-tie with conflicting intents rejected"
            );
            return (false, top1.fused);
        }
    }

    (true, top1.fused)
}

fn intents_conflict(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => !a.is_empty() && !b.is_empty() && a != b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faq_agent_core::SignalScores;

    fn ranked(fused: f64, intent: Option<&str>) -> RankedCandidate {
        RankedCandidate {
            id: "q".to_string(),
            answer: String::new(),
            intent: intent.map(str::to_string),
            scores: SignalScores::default(),
            fused,
        }
    }

    fn thresholds() -> GateThresholds {
        GateThresholds {
            min_confidence: 0.55,
            min_margin: 0.05,
            conflict_reject: true,
        }
    }

    #[test]
    fn test_empty_shortlist_rejected() {
        assert_eq!(passes_confidence_gate(&[], thresholds()), (false, 0.0));
    }

    #[test]
    fn test_confident_single_candidate_accepted() {
        let result = passes_confidence_gate(&[ranked(0.8, Some("a"))], thresholds());
        assert_eq!(result, (true, 0.8));
    }

    #[test]
    fn test_low_confidence_rejected() {
        let result = passes_confidence_gate(&[ranked(0.3, None)], thresholds());
        assert_eq!(result, (false, 0.3));
    }

    #[test]
    fn test_tight_margin_with_conflicting_intents_rejected() {
        let shortlist = [ranked(0.9, Some("billing")), ranked(0.87, Some("refund"))];
        assert_eq!(passes_confidence_gate(&shortlist, thresholds()), (false, 0.9));
    }

    #[test]
    fn test_tight_margin_with_matching_intents_accepted() {
        let shortlist = [ranked(0.9, Some("billing")), ranked(0.87, Some("billing"))];
        assert_eq!(passes_confidence_gate(&shortlist, thresholds()), (true, 0.9));
    }

    #[test]
    fn test_tight_margin_with_missing_intent_accepted() {
        let shortlist = [ranked(0.9, None), ranked(0.87, Some("refund"))];
        assert_eq!(passes_confidence_gate(&shortlist, thresholds()), (true, 0.9));

        let shortlist = [ranked(0.9, Some("")), ranked(0.87, Some("refund"))];
        assert_eq!(passes_confidence_gate(&shortlist, thresholds()), (true, 0.9));
    }

    #[test]
    fn test_wide_margin_with_conflicting_intents_accepted() {
        let shortlist = [ranked(0.9, Some("billing")), ranked(0.7, Some("refund"))];
        assert_eq!(passes_confidence_gate(&shortlist, thresholds()), (true, 0.9));
    }

    #[test]
    fn test_conflict_reject_disabled_accepts_near_tie() {
        let mut t = thresholds();
        t.conflict_reject = false;
        let shortlist = [ranked(0.9, Some("billing")), ranked(0.87, Some("refund"))];
        assert_eq!(passes_confidence_gate(&shortlist, t), (true, 0.9));
    }
}
