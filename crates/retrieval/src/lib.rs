//! Hybrid lexical retrieval for the FAQ agent
//!
//! Features:
//! - CJK-aware tokenization (bigram segmentation, no dictionary)
//! - Okapi BM25 inverted index built once over the corpus
//! - Token-set overlap as a second, orthogonal ranking signal
//! - Shortlist union with deterministic tie-breaking
//! - Weighted score fusion with intent boost
//! - JSONL knowledge-base loading

pub mod bm25;
pub mod loader;
pub mod rerank;
pub mod retriever;
pub mod text;

pub use bm25::{Bm25Index, Bm25Params};
pub use loader::load_knowledge_base;
pub use rerank::{rerank, RerankWeights};
pub use retriever::{build_retrieval_text, Retriever, RetrieverConfig};

use thiserror::Error;

/// Retrieval errors
///
/// These can only occur while the corpus is being loaded; scoring and
/// ranking over a constructed index never fail.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Knowledge base not found: {0}")]
    NotFound(String),

    #[error("Malformed knowledge record: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RetrievalError> for faq_agent_core::Error {
    fn from(err: RetrievalError) -> Self {
        faq_agent_core::Error::Retrieval(err.to_string())
    }
}
