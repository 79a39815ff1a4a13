//! Single-query answer context: retrieve, widen once if weak, rerank,
//! number the sources and label confidence.

use serde::Serialize;
use tracing::info;

use docent_core::config::RetrievalConfig;
use docent_core::errors::{DocentError, DocentResult};
use docent_core::models::{AnswerMode, AnswerSource, CitationEntry, ConfidenceTier};
use docent_core::traits::IEmbeddingProvider;
use docent_core::{RerankStrategy, RetrievalHit, SimilarityMetric};
use docent_rerank::RerankEngine;
use docent_retrieval::index::l2_normalize;
use docent_retrieval::{
    Attempt, FallbackPolicy, HybridRetriever, RetrievalMetadata, RetrievalParams,
};
use docent_session::SessionIndex;

use crate::confidence::compute_confidence;
use crate::sources::{citation_mapping, prepare_sources};

/// Longest chunk text echoed back in retrieved metadata.
pub const RETRIEVED_TEXT_CHARS: usize = 1200;

/// One ranked chunk as reported to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedChunk {
    /// 1-based position in the final hit list.
    pub rank: usize,
    pub chunk_index: usize,
    pub doc_id: String,
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub similarity: f32,
    pub lexical_score: f32,
    pub fused_score: f32,
    pub rerank_score: Option<f32>,
    pub citation_id: Option<usize>,
}

impl RetrievedChunk {
    pub fn from_hit(
        rank: usize,
        hit: &RetrievalHit,
        index: &SessionIndex,
        citation_id: Option<usize>,
    ) -> Option<Self> {
        let chunk = index.chunk(hit.idx)?;
        Some(Self {
            rank,
            chunk_index: hit.idx,
            doc_id: chunk.doc_id.clone(),
            start: chunk.start,
            end: chunk.end,
            text: chunk.text.chars().take(RETRIEVED_TEXT_CHARS).collect(),
            similarity: hit.dense_score,
            lexical_score: hit.lexical_score,
            fused_score: hit.fused_score,
            rerank_score: hit.rerank_score,
            citation_id,
        })
    }
}

/// Everything the answer step needs, computed once per query.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerContext {
    pub query: String,
    pub mode: AnswerMode,
    pub hits: Vec<RetrievalHit>,
    pub sources: Vec<AnswerSource>,
    pub citations: Vec<CitationEntry>,
    pub retrieved: Vec<RetrievedChunk>,
    pub top_similarity: Option<f32>,
    pub attempt: Attempt,
    pub floor: f32,
    pub rerank_strategy: RerankStrategy,
    pub rerank_scores: Vec<f32>,
    pub insufficient: bool,
    pub confidence: Option<ConfidenceTier>,
    pub metadata: RetrievalMetadata,
}

pub struct AnswerContextAssembler {
    config: RetrievalConfig,
    confidence_enabled: bool,
}

impl AnswerContextAssembler {
    pub fn new(config: RetrievalConfig, confidence_enabled: bool) -> Self {
        Self {
            config,
            confidence_enabled,
        }
    }

    /// Requested k raised to the configured answer size, capped at `max_retrieved`.
    pub fn answer_top_k(&self, requested_k: usize) -> usize {
        requested_k
            .max(self.config.answer_top_k)
            .min(self.config.max_retrieved)
            .max(1)
    }

    /// Embed the query with the index's model, then assemble.
    pub fn prepare(
        &self,
        index: &SessionIndex,
        embedder: &dyn IEmbeddingProvider,
        reranker: &RerankEngine,
        query: &str,
        requested_k: usize,
        mode: AnswerMode,
    ) -> DocentResult<AnswerContext> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DocentError::invalid_input("query text is empty"));
        }
        let mut query_vec = embedder.embed(query, &index.embed_model)?;
        if index.metric == SimilarityMetric::Cosine {
            l2_normalize(&mut query_vec);
        }
        self.assemble(index, reranker, query, &query_vec, requested_k, mode)
    }

    /// Assemble from an already computed query vector.
    pub fn assemble(
        &self,
        index: &SessionIndex,
        reranker: &RerankEngine,
        query: &str,
        query_vec: &[f32],
        requested_k: usize,
        mode: AnswerMode,
    ) -> DocentResult<AnswerContext> {
        let answer_top_k = self.answer_top_k(requested_k);
        let retriever =
            HybridRetriever::new(RetrievalParams::from_config(&self.config, answer_top_k));
        let policy = FallbackPolicy::from_config(&self.config, index.metric);
        let outcome = retriever.retrieve_with_fallback(&index.corpus(), query, query_vec, &policy)?;

        let mut hits = outcome.hits;
        let rerank = reranker.rerank(query, &mut hits, &index.chunks, None);

        let prepared = prepare_sources(&hits, &index.chunks, self.config.answer_top_k);
        let citations = citation_mapping(&prepared.sources);
        let retrieved: Vec<RetrievedChunk> = hits
            .iter()
            .enumerate()
            .take(self.config.max_retrieved)
            .filter_map(|(i, hit)| {
                RetrievedChunk::from_hit(i + 1, hit, index, prepared.citation_id(hit.idx))
            })
            .collect();

        let floor = self.config.similarity_floor;
        let below_floor = index.metric.is_calibrated()
            && outcome.top_similarity.is_some_and(|top| top < floor);
        let insufficient = prepared.is_empty() || below_floor;
        let confidence = self
            .confidence_enabled
            .then(|| compute_confidence(&hits, floor, &rerank.scores, insufficient));

        info!(
            component = "answer_context",
            hits = hits.len(),
            sources = prepared.sources.len(),
            attempt = ?outcome.attempt,
            rerank = %rerank.strategy,
            insufficient,
            "answer context prepared"
        );

        Ok(AnswerContext {
            query: query.to_string(),
            mode,
            hits,
            sources: prepared.sources,
            citations,
            retrieved,
            top_similarity: outcome.top_similarity,
            attempt: outcome.attempt,
            floor,
            rerank_strategy: rerank.strategy,
            rerank_scores: rerank.scores,
            insufficient,
            confidence,
            metadata: outcome.metadata,
        })
    }
}
