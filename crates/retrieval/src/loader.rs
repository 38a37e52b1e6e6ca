//! Knowledge-base loader
//!
//! Reads the preprocessed JSONL corpus: one `KnowledgeItem` object
//! per line, blank lines skipped. A malformed record is fatal at
//! startup; the corpus is never partially loaded.

use std::fs;
use std::path::Path;

use faq_agent_core::KnowledgeItem;

use crate::RetrievalError;

pub fn load_knowledge_base(path: &Path) -> Result<Vec<KnowledgeItem>, RetrievalError> {
    if !path.exists() {
        return Err(RetrievalError::NotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let mut items = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let item: KnowledgeItem = serde_json::from_str(line).map_err(|e| {
            RetrievalError::Malformed(format!("{}:{}: {}", path.display(), line_no + 1, e))
        })?;
        items.push(item);
    }

    tracing::info!(
        path = %path.display(),
        items = items.len(),
        "knowledge base loaded"
    );

    Ok(items)
}
