use crate::errors::{DocentResult, EmbeddingError};

/// Embedding generation provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a batch of texts with the named model.
    fn embed_batch(&self, texts: &[String], model: &str) -> DocentResult<Vec<Vec<f32>>>;

    /// Embed a single text.
    fn embed(&self, text: &str, model: &str) -> DocentResult<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()], model)?;
        vectors.pop().ok_or_else(|| {
            EmbeddingError::CountMismatch {
                expected: 1,
                actual: 0,
            }
            .into()
        })
    }

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool {
        true
    }
}
