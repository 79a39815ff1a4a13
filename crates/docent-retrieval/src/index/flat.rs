use std::sync::Arc;

use rayon::prelude::*;

use docent_core::errors::{DocentResult, IndexError};
use docent_core::traits::{IVectorIndex, IVectorIndexBuilder};
use docent_core::{DocentError, SimilarityMetric};

use super::{dot, l2_normalize};

/// Exhaustive inner-product / negative-L2 index.
///
/// Cosine stores unit vectors and normalizes every query, so scores are
/// cosine similarities in `[-1, 1]`. L2 scores are negative squared
/// distances, so larger is still better.
#[derive(Debug, Clone)]
pub struct FlatVectorIndex {
    vectors: Vec<Vec<f32>>,
    dimensions: usize,
    metric: SimilarityMetric,
}

impl FlatVectorIndex {
    pub fn new(vectors: &[Vec<f32>], metric: SimilarityMetric) -> DocentResult<Self> {
        let first = vectors.first().ok_or(IndexError::EmptyCorpus)?;
        let dimensions = first.len();
        let mut stored = Vec::with_capacity(vectors.len());
        for (row, v) in vectors.iter().enumerate() {
            if v.len() != dimensions {
                return Err(IndexError::DimensionMismatch {
                    row,
                    expected: dimensions,
                    actual: v.len(),
                }
                .into());
            }
            let mut v = v.clone();
            if metric == SimilarityMetric::Cosine {
                l2_normalize(&mut v);
            }
            stored.push(v);
        }
        Ok(Self {
            vectors: stored,
            dimensions,
            metric,
        })
    }

    fn similarity(&self, stored: &[f32], query: &[f32]) -> f32 {
        match self.metric {
            SimilarityMetric::Cosine => dot(stored, query),
            SimilarityMetric::L2 => -stored
                .iter()
                .zip(query)
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f32>(),
        }
    }
}

impl IVectorIndex for FlatVectorIndex {
    fn search(&self, query: &[f32], k: usize) -> DocentResult<Vec<(usize, f32)>> {
        if query.len() != self.dimensions {
            return Err(DocentError::RetrievalUnavailable {
                reason: format!(
                    "query has {} dimensions, index has {}",
                    query.len(),
                    self.dimensions
                ),
            });
        }
        let mut q = query.to_vec();
        if self.metric == SimilarityMetric::Cosine {
            l2_normalize(&mut q);
        }
        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .par_iter()
            .enumerate()
            .map(|(i, v)| (i, self.similarity(v, &q)))
            .collect();
        // Stable: equal scores keep ascending chunk order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k.max(1));
        Ok(scored)
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn metric(&self) -> SimilarityMetric {
        self.metric
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Builder handed to the session indexer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatVectorIndexBuilder;

impl IVectorIndexBuilder for FlatVectorIndexBuilder {
    fn build(
        &self,
        vectors: &[Vec<f32>],
        metric: SimilarityMetric,
    ) -> DocentResult<Arc<dyn IVectorIndex>> {
        Ok(Arc::new(FlatVectorIndex::new(vectors, metric)?))
    }
}
