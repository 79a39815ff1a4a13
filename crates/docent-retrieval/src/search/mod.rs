//! Hybrid retrieval: dense + lexical → RRF → optional MMR, with a single
//! fallback widen pass.

pub mod dense;
pub mod lexical;
pub mod mmr;
pub mod rrf_fusion;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use docent_core::config::RetrievalConfig;
use docent_core::errors::DocentResult;
use docent_core::traits::{ILexicalIndex, IVectorIndex};
use docent_core::{RetrievalHit, RetrievalStrategy, SimilarityMetric};

/// Read-only view of one session's search structures.
#[derive(Clone, Copy)]
pub struct RetrievalCorpus<'a> {
    pub vector: &'a dyn IVectorIndex,
    pub lexical: Option<&'a dyn ILexicalIndex>,
    /// Row-aligned with the chunk list. Needed for MMR only.
    pub embeddings: Option<&'a [Vec<f32>]>,
    pub chunk_count: usize,
}

/// Knobs for one retrieval pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalParams {
    pub strategy: RetrievalStrategy,
    pub dense_k: usize,
    pub lexical_k: usize,
    pub fusion_rrf_k: u32,
    pub answer_top_k: usize,
    pub use_mmr: bool,
    pub mmr_lambda: f32,
}

impl RetrievalParams {
    pub fn from_config(config: &RetrievalConfig, answer_top_k: usize) -> Self {
        Self {
            strategy: config.strategy,
            dense_k: config.dense_k,
            lexical_k: config.lexical_k,
            fusion_rrf_k: config.fusion_rrf_k,
            answer_top_k,
            use_mmr: config.use_mmr,
            mmr_lambda: config.mmr_lambda,
        }
    }

    /// Same parameters with both candidate pools enlarged by `by`.
    pub fn widened(&self, by: usize) -> Self {
        Self {
            dense_k: self.dense_k.saturating_add(by),
            lexical_k: self.lexical_k.saturating_add(by),
            ..self.clone()
        }
    }
}

/// When to run the fallback pass and how far to widen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackPolicy {
    pub similarity_floor: f32,
    pub widen_by: usize,
    pub metric: SimilarityMetric,
}

impl FallbackPolicy {
    pub fn from_config(config: &RetrievalConfig, metric: SimilarityMetric) -> Self {
        Self {
            similarity_floor: config.similarity_floor,
            widen_by: config.fallback_widen_k,
            metric,
        }
    }

    /// No hits, or a calibrated metric whose top similarity is under the floor.
    pub fn needs_fallback(&self, hits: &[RetrievalHit]) -> bool {
        match hits.first() {
            None => true,
            Some(top) => self.metric.is_calibrated() && top.dense_score < self.similarity_floor,
        }
    }
}

/// Orders and score maps behind a result, for debug and trace surfaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalMetadata {
    pub dense_order: Vec<usize>,
    pub lexical_order: Vec<usize>,
    pub fused_order: Vec<usize>,
    pub dense_scores: BTreeMap<usize, f32>,
    pub lexical_scores: BTreeMap<usize, f32>,
    pub fused_scores: BTreeMap<usize, f32>,
    pub selected: Vec<usize>,
    pub params: RetrievalParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attempt {
    Primary,
    Fallback,
}

/// Result of `retrieve_with_fallback`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalOutcome {
    pub hits: Vec<RetrievalHit>,
    pub metadata: RetrievalMetadata,
    pub attempt: Attempt,
    /// Dense score of the top hit after the final attempt.
    pub top_similarity: Option<f32>,
}

/// Stateless hybrid retriever.
#[derive(Debug, Clone)]
pub struct HybridRetriever {
    params: RetrievalParams,
}

impl HybridRetriever {
    pub fn new(params: RetrievalParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RetrievalParams {
        &self.params
    }

    /// One retrieval pass with this retriever's parameters.
    pub fn retrieve(
        &self,
        corpus: &RetrievalCorpus<'_>,
        query_text: &str,
        query_vec: &[f32],
    ) -> DocentResult<(Vec<RetrievalHit>, RetrievalMetadata)> {
        run_pass(corpus, query_text, query_vec, &self.params)
    }

    /// Retrieve, then widen once if the policy asks for it. Never retries twice.
    pub fn retrieve_with_fallback(
        &self,
        corpus: &RetrievalCorpus<'_>,
        query_text: &str,
        query_vec: &[f32],
        policy: &FallbackPolicy,
    ) -> DocentResult<RetrievalOutcome> {
        let (hits, metadata) = run_pass(corpus, query_text, query_vec, &self.params)?;
        let top = hits.first().map(|h| h.dense_score);
        if !policy.needs_fallback(&hits) {
            return Ok(RetrievalOutcome {
                hits,
                metadata,
                attempt: Attempt::Primary,
                top_similarity: top,
            });
        }

        info!(
            component = "hybrid_retriever",
            top_similarity = top,
            floor = policy.similarity_floor,
            widen_by = policy.widen_by,
            "primary retrieval weak, widening once"
        );
        let widened = self.params.widened(policy.widen_by);
        let (hits, metadata) = run_pass(corpus, query_text, query_vec, &widened)?;
        let top_similarity = hits.first().map(|h| h.dense_score).or(top);
        Ok(RetrievalOutcome {
            hits,
            metadata,
            attempt: Attempt::Fallback,
            top_similarity,
        })
    }
}

fn run_pass(
    corpus: &RetrievalCorpus<'_>,
    query_text: &str,
    query_vec: &[f32],
    params: &RetrievalParams,
) -> DocentResult<(Vec<RetrievalHit>, RetrievalMetadata)> {
    let answer_top_k = params.answer_top_k.max(1);
    let dense_k = if params.dense_k == 0 {
        answer_top_k
    } else {
        params.dense_k
    };

    let dense = dense::dense_search(corpus.vector, query_vec, dense_k, corpus.chunk_count)?;
    let lexical = match (params.strategy, corpus.lexical) {
        (RetrievalStrategy::Hybrid, Some(index)) => {
            lexical::lexical_search(index, query_text, params.lexical_k, corpus.chunk_count)
        }
        _ => Vec::new(),
    };

    let dense_order: Vec<usize> = dense.iter().map(|(i, _)| *i).collect();
    let lexical_order: Vec<usize> = lexical.iter().map(|(i, _)| *i).collect();
    let fused = rrf_fusion::fuse(&dense_order, &lexical_order, params.fusion_rrf_k, answer_top_k);
    let fused_order: Vec<usize> = fused.iter().map(|c| c.idx).collect();

    let dense_scores: BTreeMap<usize, f32> = first_scores(&dense);
    let lexical_scores: BTreeMap<usize, f32> = first_scores(&lexical);
    let fused_scores: BTreeMap<usize, f32> = fused.iter().map(|c| (c.idx, c.fused_score)).collect();

    let candidates = if fused_order.is_empty() {
        &dense_order
    } else {
        &fused_order
    };
    let selected = if params.use_mmr {
        mmr::mmr_select(
            query_vec,
            corpus.embeddings,
            candidates,
            answer_top_k,
            params.mmr_lambda,
        )
    } else {
        candidates.iter().copied().take(answer_top_k).collect()
    };

    let hits: Vec<RetrievalHit> = selected
        .iter()
        .filter(|&&idx| idx < corpus.chunk_count)
        .map(|&idx| {
            RetrievalHit::new(
                idx,
                dense_scores.get(&idx).copied().unwrap_or(0.0),
                lexical_scores.get(&idx).copied().unwrap_or(0.0),
                fused_scores.get(&idx).copied().unwrap_or(0.0),
            )
        })
        .collect();

    debug!(
        component = "hybrid_retriever",
        dense = dense_order.len(),
        lexical = lexical_order.len(),
        fused = fused_order.len(),
        selected = hits.len(),
        "retrieval pass complete"
    );

    let metadata = RetrievalMetadata {
        dense_order,
        lexical_order,
        fused_order,
        dense_scores,
        lexical_scores,
        fused_scores,
        selected,
        params: RetrievalParams {
            dense_k,
            ..params.clone()
        },
    };
    Ok((hits, metadata))
}

fn first_scores(pairs: &[(usize, f32)]) -> BTreeMap<usize, f32> {
    let mut map = BTreeMap::new();
    for &(idx, score) in pairs {
        map.entry(idx).or_insert(score);
    }
    map
}

pub use rrf_fusion::FusedCandidate;
