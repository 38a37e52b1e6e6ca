//! Conversation turns and knowledge-base entries

use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
}

/// One turn of live conversation or of a stored exemplar's context.
/// Ordering among messages is chronological and significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            text: text.into(),
        }
    }
}

/// Immutable knowledge-base entry
///
/// Loaded once at startup and read-only for the lifetime of the
/// process. Corpus position must remain stable for the life of a
/// constructed retriever, since candidate tie-breaking keys on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    /// Unique entry ID
    #[serde(default)]
    pub id: String,
    /// Canonical exemplar question
    #[serde(default)]
    pub query: String,
    /// Response text
    #[serde(default)]
    pub answer: String,
    /// Optional category tag
    #[serde(default)]
    pub intent: Option<String>,
    /// Prior turns belonging to this exemplar, used only to build its
    /// retrieval text
    #[serde(default)]
    pub context: Vec<Message>,
}
