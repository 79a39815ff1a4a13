use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::{RetrievalStrategy, SimilarityMetric};

/// Hybrid retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub strategy: RetrievalStrategy,
    /// Candidates requested from the vector index.
    pub dense_k: usize,
    /// Candidates taken from the lexical order.
    pub lexical_k: usize,
    /// RRF k-value for rank fusion.
    pub fusion_rrf_k: u32,
    /// Sources handed to the answer step.
    pub answer_top_k: usize,
    /// Hard cap on hits returned to any caller.
    pub max_retrieved: usize,
    pub use_mmr: bool,
    /// MMR trade-off; 1.0 is pure relevance.
    pub mmr_lambda: f32,
    /// Below this top similarity the retriever widens once.
    pub similarity_floor: f32,
    /// Added to both `dense_k` and `lexical_k` on the fallback pass.
    pub fallback_widen_k: usize,
    pub metric: SimilarityMetric,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            strategy: RetrievalStrategy::Hybrid,
            dense_k: defaults::DEFAULT_DENSE_K,
            lexical_k: defaults::DEFAULT_LEXICAL_K,
            fusion_rrf_k: defaults::DEFAULT_FUSION_RRF_K,
            answer_top_k: defaults::DEFAULT_ANSWER_TOP_K,
            max_retrieved: defaults::DEFAULT_MAX_RETRIEVED,
            use_mmr: defaults::DEFAULT_USE_MMR,
            mmr_lambda: defaults::DEFAULT_MMR_LAMBDA,
            similarity_floor: defaults::DEFAULT_SIMILARITY_FLOOR,
            fallback_widen_k: defaults::DEFAULT_FALLBACK_WIDEN_K,
            metric: SimilarityMetric::Cosine,
        }
    }
}
