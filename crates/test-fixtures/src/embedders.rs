use std::sync::atomic::{AtomicUsize, Ordering};

use docent_core::errors::{DocentResult, EmbeddingError};
use docent_core::traits::IEmbeddingProvider;

/// One axis per keyword plus a trailing axis for every other token.
///
/// Texts sharing keywords get high cosine similarity, so tests can predict
/// the dense order exactly.
#[derive(Debug)]
pub struct KeywordEmbedder {
    vocab: Vec<String>,
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new(vocab: &[&str]) -> Self {
        Self {
            vocab: vocab.iter().map(|w| w.to_lowercase()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.vocab.len() + 1
    }

    pub fn vector(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0; self.dimensions()];
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            match self.vocab.iter().position(|w| w == token) {
                Some(axis) => v[axis] += 1.0,
                None => v[self.vocab.len()] += 0.1,
            }
        }
        v
    }

    /// Number of `embed_batch` calls served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IEmbeddingProvider for KeywordEmbedder {
    fn embed_batch(&self, texts: &[String], _model: &str) -> DocentResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn name(&self) -> &str {
        "keyword-fixture"
    }
}

/// Always fails.
#[derive(Debug, Default)]
pub struct FailingEmbedder;

impl IEmbeddingProvider for FailingEmbedder {
    fn embed_batch(&self, _texts: &[String], _model: &str) -> DocentResult<Vec<Vec<f32>>> {
        Err(EmbeddingError::ProviderUnavailable {
            provider: "failing-fixture".into(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "failing-fixture"
    }

    fn is_available(&self) -> bool {
        false
    }
}
