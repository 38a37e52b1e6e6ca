//! Request orchestration
//!
//! Per-request control flow: normalize -> guardrail veto -> context
//! fusion -> answer-cache lookup -> retrieval-cache lookup or compute
//! -> rerank -> truncate -> confidence gate -> answer build -> cache.
//! The retriever and corpus are read-only after construction; the two
//! caches are the only mutable shared state.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use faq_agent_config::{load_settings, Settings};
use faq_agent_core::{AnswerPayload, KnowledgeItem, Message, RetrievalCandidate};
use faq_agent_retrieval::text::normalize;
use faq_agent_retrieval::{load_knowledge_base, rerank, RerankWeights, Retriever, RetrieverConfig};

use crate::answer::build_answer;
use crate::cache::TtlCache;
use crate::context::fuse_query;
use crate::gate::{passes_confidence_gate, GateThresholds};
use crate::guardrails::apply_guardrails;

/// The FAQ agent decision core
///
/// Construction is the only fallible phase of the system (config and
/// corpus loading happen before it); `respond` itself always returns
/// a payload, falling back to the refusal template.
#[derive(Debug)]
pub struct ChatPipeline {
    settings: Settings,
    retriever: Retriever,
    answer_cache: TtlCache<AnswerPayload>,
    retrieval_cache: TtlCache<Vec<RetrievalCandidate>>,
    retrievals: AtomicU64,
}

impl ChatPipeline {
    pub fn new(settings: Settings, items: Vec<KnowledgeItem>) -> Self {
        let retriever = Retriever::new(
            items,
            RetrieverConfig {
                bm25_top_k: settings.retrieval.hybrid.bm25_top_k,
                vector_top_k: settings.retrieval.hybrid.vector_top_k,
            },
        );
        let answer_cache = TtlCache::new(Duration::from_secs(settings.cache.answer_cache_ttl_sec));
        let retrieval_cache =
            TtlCache::new(Duration::from_secs(settings.cache.retrieval_cache_ttl_sec));

        tracing::info!(items = retriever.len(), "chat pipeline ready");

        Self {
            settings,
            retriever,
            answer_cache,
            retrieval_cache,
            retrievals: AtomicU64::new(0),
        }
    }

    /// Build from settings, loading the knowledge base the settings
    /// point at. This is the one fallible phase of the system; a
    /// missing or malformed corpus is fatal here, never mid-request.
    pub fn from_settings(settings: Settings) -> faq_agent_core::Result<Self> {
        let items = load_knowledge_base(Path::new(&settings.retrieval.index_source))?;
        Ok(Self::new(settings, items))
    }

    /// Build from an optional config file plus environment overrides
    pub fn from_config(config_path: Option<&Path>) -> faq_agent_core::Result<Self> {
        let settings = load_settings(config_path)?;
        Self::from_settings(settings)
    }

    /// Number of knowledge items behind the retriever
    pub fn corpus_len(&self) -> usize {
        self.retriever.len()
    }

    /// Retrieval computations that were not served from cache
    pub fn retrieval_count(&self) -> u64 {
        self.retrievals.load(Ordering::Relaxed)
    }

    /// Answer the query against the knowledge base, or refuse
    pub fn respond(&self, query: &str, context: &[Message]) -> AnswerPayload {
        let refuse_template = &self.settings.llm.refuse_template;

        let normalized = if self.settings.input.normalize.trim_spaces {
            normalize(query)
        } else {
            query.to_string()
        };

        if let Some(refusal) = apply_guardrails(
            &normalized,
            refuse_template,
            &self.settings.guardrails.sensitive_keywords,
            &self.settings.guardrails.out_of_scope_policy,
        ) {
            return refusal;
        }

        let ctx = &self.settings.input.context;
        let fused = fuse_query(
            &normalized,
            context,
            &ctx.referential_tokens,
            ctx.min_query_len_for_context,
            ctx.max_turns,
        );

        if let Some(cached) = self.answer_cache.get(&fused) {
            tracing::debug!(query = %fused, "answer cache hit");
            return cached;
        }

        let candidates = match self.retrieval_cache.get(&fused) {
            Some(cached) => cached,
            None => {
                let computed = self.retriever.retrieve(&fused);
                self.retrievals.fetch_add(1, Ordering::Relaxed);
                self.retrieval_cache.set(fused.clone(), computed.clone());
                computed
            }
        };

        if candidates.is_empty() {
            return AnswerPayload::refusal(refuse_template);
        }

        let weights = &self.settings.retrieval.hybrid.merge_weights;
        let mut ranked = rerank(
            &candidates,
            RerankWeights {
                vector: weights.vector,
                bm25: weights.bm25,
                intent_boost: self.settings.rerank.intent_boost,
            },
        );
        ranked.truncate(self.settings.rerank.top_k);

        let gate = &self.settings.confidence_gate;
        let (accepted, confidence) = passes_confidence_gate(
            &ranked,
            GateThresholds {
                min_confidence: gate.min_confidence,
                min_margin: gate.min_margin,
                conflict_reject: gate.conflict_reject,
            },
        );
        if !accepted {
            tracing::debug!(query = %fused, confidence, "confidence gate rejected");
            return AnswerPayload::refusal(refuse_template);
        }

        let mut response = build_answer(&ranked, refuse_template);
        response.confidence = confidence;
        self.answer_cache.set(fused, response.clone());
        response
    }
}
