//! Hybrid retriever
//!
//! Merges the BM25 and token-overlap shortlists over a fixed corpus.
//! The overlap signal is plain Jaccard similarity on token sets, a
//! cheap stand-in for dense vector search, which is why config and
//! scores still call it "vector".

use std::collections::HashSet;

use faq_agent_core::{KnowledgeItem, RetrievalCandidate, Role, SignalScores};

use crate::bm25::{Bm25Index, Bm25Params};
use crate::text::{normalize, tokenize};

/// Retriever shortlist sizes
#[derive(Debug, Clone, Copy)]
pub struct RetrieverConfig {
    /// Candidates taken from the BM25 signal
    pub bm25_top_k: usize,
    /// Candidates taken from the overlap signal
    pub vector_top_k: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            bm25_top_k: 20,
            vector_top_k: 20,
        }
    }
}

/// Retrieval text for one knowledge item: prior user-turn texts in
/// chronological order, then the exemplar query. Ranking is against
/// the question, never the answer.
pub fn build_retrieval_text(item: &KnowledgeItem) -> String {
    let mut parts: Vec<&str> = item
        .context
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| m.text.as_str())
        .collect();
    parts.push(&item.query);
    parts.join(" ")
}

/// Hybrid retriever over a fixed corpus
///
/// Owns the BM25 index and the per-document token sets; both are
/// built once at construction and read-only afterwards, so concurrent
/// `retrieve` calls need no coordination.
#[derive(Debug)]
pub struct Retriever {
    items: Vec<KnowledgeItem>,
    bm25: Bm25Index,
    token_sets: Vec<HashSet<String>>,
    config: RetrieverConfig,
}

impl Retriever {
    pub fn new(items: Vec<KnowledgeItem>, config: RetrieverConfig) -> Self {
        let texts: Vec<String> = items.iter().map(build_retrieval_text).collect();
        let bm25 = Bm25Index::new(&texts, Bm25Params::default());
        let token_sets = bm25.token_sets();
        tracing::debug!(items = items.len(), "hybrid retriever built");
        Self {
            items,
            bm25,
            token_sets,
            config,
        }
    }

    /// Number of knowledge items behind this retriever
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Union of the per-signal shortlists, each candidate carrying
    /// both raw scores. Emitted in corpus order; callers sort.
    pub fn retrieve(&self, query: &str) -> Vec<RetrievalCandidate> {
        let bm25_scores = self.bm25.score(query);

        let query_tokens: HashSet<String> = tokenize(&normalize(query)).into_iter().collect();
        let vector_scores: Vec<f64> = self
            .token_sets
            .iter()
            .map(|set| jaccard(&query_tokens, set))
            .collect();

        let mut merged = top_indices(&bm25_scores, self.config.bm25_top_k);
        for idx in top_indices(&vector_scores, self.config.vector_top_k) {
            if !merged.contains(&idx) {
                merged.push(idx);
            }
        }
        merged.sort_unstable();

        merged
            .into_iter()
            .map(|idx| {
                let item = &self.items[idx];
                RetrievalCandidate {
                    id: item.id.clone(),
                    answer: item.answer.clone(),
                    intent: item.intent.clone(),
                    scores: SignalScores {
                        bm25: bm25_scores[idx],
                        vector: vector_scores[idx],
                    },
                }
            })
            .collect()
    }
}

/// Indices of the `k` largest scores; ties keep corpus order (the
/// sort is stable and the input is already in ascending index order).
fn top_indices(scores: &[f64], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    indices.truncate(k);
    indices
}

/// |A∩B| / |A∪B|, 0 when either set is empty
fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use faq_agent_core::Message;

    fn item(id: &str, query: &str) -> KnowledgeItem {
        KnowledgeItem {
            id: id.to_string(),
            query: query.to_string(),
            answer: format!("answer for {id}"),
            intent: None,
            context: Vec::new(),
        }
    }

    #[test]
    fn test_empty_corpus_yields_no_candidates() {
        let retriever = Retriever::new(Vec::new(), RetrieverConfig::default());
        assert!(retriever.retrieve("可以开发票吗").is_empty());
        assert!(retriever.retrieve("").is_empty());
    }

    #[test]
    fn test_retrieval_text_uses_user_turns_and_query() {
        let entry = KnowledgeItem {
            id: "q1".to_string(),
            query: "这个".to_string(),
            answer: "可以".to_string(),
            intent: None,
            context: vec![
                Message::user("开发票吗"),
                Message::system("可以开电子发票"),
                Message::user("纸质的呢"),
            ],
        };
        assert_eq!(build_retrieval_text(&entry), "开发票吗 纸质的呢 这个");
    }

    #[test]
    fn test_candidates_carry_both_signals() {
        let retriever = Retriever::new(
            vec![item("q1", "可以开发票吗"), item("q2", "退款多久到账")],
            RetrieverConfig::default(),
        );
        let candidates = retriever.retrieve("开发票");
        let top = candidates.iter().find(|c| c.id == "q1").unwrap();
        assert!(top.scores.bm25 > 0.0);
        assert!(top.scores.vector > 0.0);
    }

    #[test]
    fn test_shortlists_are_bounded_and_union_deduplicated() {
        let items: Vec<KnowledgeItem> = (0..10)
            .map(|i| item(&format!("q{i}"), "可以开发票吗"))
            .collect();
        let retriever = Retriever::new(
            items,
            RetrieverConfig {
                bm25_top_k: 3,
                vector_top_k: 3,
            },
        );
        // identical texts: both signals tie everywhere, stable
        // tie-break must pick the first three corpus entries once
        let candidates = retriever.retrieve("开发票");
        let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["q0", "q1", "q2"]);
    }

    #[test]
    fn test_top_indices_ties_keep_corpus_order() {
        assert_eq!(top_indices(&[1.0, 1.0, 1.0], 2), vec![0, 1]);
        assert_eq!(top_indices(&[0.5, 2.0, 2.0], 2), vec![1, 2]);
    }

    #[test]
    fn test_jaccard_empty_sets() {
        let empty = HashSet::new();
        let full: HashSet<String> = ["发票".to_string()].into_iter().collect();
        assert_eq!(jaccard(&empty, &full), 0.0);
        assert_eq!(jaccard(&full, &empty), 0.0);
        assert_eq!(jaccard(&full, &full), 1.0);
    }
}
