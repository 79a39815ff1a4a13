use std::sync::Arc;

use crate::errors::DocentResult;
use crate::models::SimilarityMetric;

/// Nearest-neighbor search over one session's chunk embeddings.
pub trait IVectorIndex: Send + Sync {
    /// Up to `k` `(chunk index, similarity)` pairs, most similar first.
    fn search(&self, query: &[f32], k: usize) -> DocentResult<Vec<(usize, f32)>>;

    /// Number of indexed vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn metric(&self) -> SimilarityMetric;

    fn dimensions(&self) -> usize;
}

/// Builds a vector index from row vectors.
pub trait IVectorIndexBuilder: Send + Sync {
    fn build(
        &self,
        vectors: &[Vec<f32>],
        metric: SimilarityMetric,
    ) -> DocentResult<Arc<dyn IVectorIndex>>;
}
