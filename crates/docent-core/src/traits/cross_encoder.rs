use crate::errors::RerankError;

/// Pairwise relevance scorer used by the `ce` rerank strategy.
pub trait ICrossEncoder: Send + Sync {
    /// One score per candidate, in candidate order. Higher is more relevant.
    fn predict(&self, query: &str, candidates: &[String]) -> Result<Vec<f32>, RerankError>;

    /// Whether the model loaded and can serve requests.
    fn is_available(&self) -> bool;

    fn model_id(&self) -> &str;
}
