//! Score fusion
//!
//! Folds the two raw signals into one final score. BM25 is normalized
//! by the maximum across the candidate set so both signals live on a
//! comparable scale before weighting.

use faq_agent_core::{RankedCandidate, RetrievalCandidate};

/// Fusion weights and intent boost
#[derive(Debug, Clone, Copy)]
pub struct RerankWeights {
    pub vector: f64,
    pub bm25: f64,
    /// Added once to any candidate carrying a non-empty intent tag
    pub intent_boost: f64,
}

impl Default for RerankWeights {
    fn default() -> Self {
        Self {
            vector: 0.6,
            bm25: 0.4,
            intent_boost: 0.0,
        }
    }
}

/// Fuse raw signals into ranked candidates, descending by fused
/// score with ties keeping the input order. The input is left
/// untouched; retrieval candidates cached before this call are safe
/// to rerank again with different weights.
pub fn rerank(candidates: &[RetrievalCandidate], weights: RerankWeights) -> Vec<RankedCandidate> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let max_bm25 = candidates
        .iter()
        .map(|c| c.scores.bm25)
        .fold(0.0_f64, f64::max);
    let divisor = if max_bm25 > 0.0 { max_bm25 } else { 1.0 };

    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .map(|c| {
            let bm25_norm = c.scores.bm25 / divisor;
            let intent_score = if has_intent(c) { weights.intent_boost } else { 0.0 };
            RankedCandidate {
                id: c.id.clone(),
                answer: c.answer.clone(),
                intent: c.intent.clone(),
                scores: c.scores,
                fused: weights.vector * c.scores.vector + weights.bm25 * bm25_norm + intent_score,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.fused.total_cmp(&a.fused));
    ranked
}

fn has_intent(candidate: &RetrievalCandidate) -> bool {
    candidate.intent.as_deref().is_some_and(|i| !i.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use faq_agent_core::SignalScores;

    fn candidate(id: &str, bm25: f64, vector: f64, intent: Option<&str>) -> RetrievalCandidate {
        RetrievalCandidate {
            id: id.to_string(),
            answer: String::new(),
            intent: intent.map(str::to_string),
            scores: SignalScores { bm25, vector },
        }
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert!(rerank(&[], RerankWeights::default()).is_empty());
    }

    #[test]
    fn test_single_candidate_normalizes_to_itself() {
        let weights = RerankWeights {
            vector: 0.6,
            bm25: 0.4,
            intent_boost: 0.1,
        };
        let ranked = rerank(&[candidate("q1", 3.2, 0.5, Some("invoice"))], weights);
        // bm25 normalized by its own maximum: 0.6*0.5 + 0.4*1.0 + 0.1
        assert!((ranked[0].fused - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_zero_max_bm25_does_not_divide_by_zero() {
        let ranked = rerank(
            &[candidate("q1", 0.0, 0.3, None), candidate("q2", 0.0, 0.7, None)],
            RerankWeights::default(),
        );
        assert_eq!(ranked[0].id, "q2");
        assert!((ranked[0].fused - 0.42).abs() < 1e-9);
    }

    #[test]
    fn test_intent_boost_only_for_non_empty_intent() {
        let weights = RerankWeights {
            vector: 1.0,
            bm25: 0.0,
            intent_boost: 0.2,
        };
        let ranked = rerank(
            &[
                candidate("tagged", 0.0, 0.5, Some("billing")),
                candidate("blank", 0.0, 0.5, Some("")),
                candidate("none", 0.0, 0.5, None),
            ],
            weights,
        );
        assert_eq!(ranked[0].id, "tagged");
        assert!((ranked[0].fused - 0.7).abs() < 1e-9);
        assert!((ranked[1].fused - 0.5).abs() < 1e-9);
        assert!((ranked[2].fused - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rerank(
            &[
                candidate("a", 1.0, 0.4, None),
                candidate("b", 1.0, 0.4, None),
                candidate("c", 1.0, 0.9, None),
            ],
            RerankWeights::default(),
        );
        let ids: Vec<&str> = ranked.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = vec![candidate("q1", 2.0, 0.5, None)];
        let before = input.clone();
        let _ = rerank(&input, RerankWeights::default());
        assert_eq!(input, before);
    }
}
