//! Context fusion
//!
//! Short or referential queries ("这个呢？") cannot be retrieved on
//! their own; they are prefixed with the tail of the user's prior
//! turns. The fused string, not the raw utterance, is both the cache
//! key and the retrieval input, so two utterances fusing to the same
//! effective query share a cache slot.

use faq_agent_core::{Message, Role};
use faq_agent_retrieval::text::contains_referential;

/// Fold prior user turns into the query when it is too short or
/// contains a referential marker
///
/// `min_len` counts characters, not bytes. `max_turns <= 0` keeps all
/// prior user turns. When fusion does not trigger, or there is
/// nothing to fold in, the raw query is returned unchanged.
pub fn fuse_query(
    query: &str,
    context: &[Message],
    referential_tokens: &[String],
    min_len: usize,
    max_turns: i64,
) -> String {
    let needs_context =
        query.chars().count() < min_len || contains_referential(query, referential_tokens);
    if context.is_empty() || !needs_context {
        return query.to_string();
    }

    let user_texts: Vec<&str> = context
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| m.text.as_str())
        .collect();

    let tail = if max_turns > 0 {
        let keep = (max_turns as usize).min(user_texts.len());
        &user_texts[user_texts.len() - keep..]
    } else {
        &user_texts[..]
    };
    if tail.is_empty() {
        return query.to_string();
    }

    let mut fused = tail.join(" ");
    fused.push(' ');
    fused.push_str(query);
    fused
}
