//! Core types for the FAQ agent
//!
//! This crate provides the foundational types shared by all other crates:
//! - Conversation turns and knowledge-base entries
//! - Retrieval candidates (raw and reranked)
//! - The answer payload returned to collaborators
//! - Error types

pub mod candidate;
pub mod error;
pub mod knowledge;
pub mod payload;

pub use candidate::{RankedCandidate, RetrievalCandidate, SignalScores};
pub use error::{Error, Result};
pub use knowledge::{KnowledgeItem, Message, Role};
pub use payload::AnswerPayload;
