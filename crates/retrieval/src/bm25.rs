//! Okapi BM25 inverted index
//!
//! Built once over the corpus retrieval texts; scoring walks only the
//! postings of the query tokens, so documents never touched by a
//! query token score exactly 0.

use std::collections::{HashMap, HashSet};

use crate::text::{normalize, tokenize};

/// BM25 tuning parameters
#[derive(Debug, Clone, Copy)]
pub struct Bm25Params {
    /// Term-frequency saturation
    pub k1: f64,
    /// Length normalization strength
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.5, b: 0.75 }
    }
}

/// Inverted index with per-term idf and per-document lengths
#[derive(Debug)]
pub struct Bm25Index {
    params: Bm25Params,
    doc_len: Vec<usize>,
    avgdl: f64,
    postings: HashMap<String, Vec<(usize, u32)>>,
    idf: HashMap<String, f64>,
    doc_tokens: Vec<Vec<String>>,
}

impl Bm25Index {
    /// Build the index from already-derived retrieval texts
    pub fn new(documents: &[String], params: Bm25Params) -> Self {
        let mut doc_len = Vec::with_capacity(documents.len());
        let mut doc_tokens = Vec::with_capacity(documents.len());
        let mut postings: HashMap<String, Vec<(usize, u32)>> = HashMap::new();

        for (idx, doc) in documents.iter().enumerate() {
            let tokens = tokenize(&normalize(doc));
            let mut tf: HashMap<String, u32> = HashMap::new();
            for token in &tokens {
                *tf.entry(token.clone()).or_insert(0) += 1;
            }
            doc_len.push(tokens.len());
            doc_tokens.push(tokens);
            for (term, freq) in tf {
                postings.entry(term).or_default().push((idx, freq));
            }
        }

        let total_docs = documents.len();
        let avgdl = if total_docs > 0 {
            doc_len.iter().sum::<usize>() as f64 / total_docs as f64
        } else {
            0.0
        };

        // Okapi smoothing keeps idf non-negative for df <= N
        let mut idf = HashMap::with_capacity(postings.len());
        for (term, posting) in &postings {
            let df = posting.len() as f64;
            let value = ((total_docs as f64 - df + 0.5) / (df + 0.5) + 1.0).ln();
            idf.insert(term.clone(), value);
        }

        Self {
            params,
            doc_len,
            avgdl,
            postings,
            idf,
            doc_tokens,
        }
    }

    /// Score every document against the query; output is parallel to
    /// corpus order.
    pub fn score(&self, query: &str) -> Vec<f64> {
        let mut scores = vec![0.0; self.doc_tokens.len()];
        // degenerate corpus: all lengths are 0, avoid dividing by 0
        let avgdl = if self.avgdl > 0.0 { self.avgdl } else { 1.0 };

        for term in tokenize(&normalize(query)) {
            let Some(posting) = self.postings.get(&term) else {
                continue;
            };
            let idf = self.idf.get(&term).copied().unwrap_or(0.0);
            for &(doc_idx, freq) in posting {
                let tf = f64::from(freq);
                let dl = self.doc_len[doc_idx] as f64;
                let denom =
                    tf + self.params.k1 * (1.0 - self.params.b + self.params.b * dl / avgdl);
                scores[doc_idx] += idf * tf * (self.params.k1 + 1.0) / denom;
            }
        }
        scores
    }

    /// Per-document token sets, for the overlap signal
    pub fn token_sets(&self) -> Vec<HashSet<String>> {
        self.doc_tokens
            .iter()
            .map(|tokens| tokens.iter().cloned().collect())
            .collect()
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.doc_tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_tokens.is_empty()
    }
}
