use serde::{Deserialize, Serialize};

/// One ranked candidate chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalHit {
    pub idx: usize,
    pub dense_score: f32,
    pub lexical_score: f32,
    pub fused_score: f32,
    /// Set only after a successful rerank pass.
    pub rerank_score: Option<f32>,
}

impl RetrievalHit {
    pub fn new(idx: usize, dense_score: f32, lexical_score: f32, fused_score: f32) -> Self {
        Self {
            idx,
            dense_score,
            lexical_score,
            fused_score,
            rerank_score: None,
        }
    }

    /// Rerank score when present, fused score otherwise.
    pub fn display_score(&self) -> f32 {
        self.rerank_score.unwrap_or(self.fused_score)
    }
}
