//! Retrieval candidate types
//!
//! Candidates exist in two shapes: `RetrievalCandidate` as emitted by
//! the retriever (raw per-signal scores only), and `RankedCandidate`
//! as produced by score fusion. The confidence gate and answer
//! builder accept only the ranked shape, so an unranked shortlist can
//! never reach them.

use serde::{Deserialize, Serialize};

/// Raw per-signal relevance scores attached at retrieval time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalScores {
    /// Okapi BM25 score, unnormalized
    pub bm25: f64,
    /// Token-set Jaccard overlap
    pub vector: f64,
}

/// Candidate emitted by the retriever, before score fusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalCandidate {
    /// ID of the backing knowledge item
    pub id: String,
    pub answer: String,
    pub intent: Option<String>,
    pub scores: SignalScores,
}

/// Candidate after score fusion, ordered by `fused` descending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub id: String,
    pub answer: String,
    pub intent: Option<String>,
    /// Raw signals carried through for inspection
    pub scores: SignalScores,
    /// Weighted fusion of the raw signals plus intent boost
    pub fused: f64,
}
