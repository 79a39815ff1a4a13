//! In-memory embedding cache in front of any provider.
//!
//! Keys are blake3 hashes of `(model, text)`, so the same text embedded with
//! two models never collides. Only cache misses reach the wrapped provider.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

use docent_core::errors::{DocentResult, EmbeddingError};
use docent_core::traits::IEmbeddingProvider;

pub const DEFAULT_CACHE_ENTRIES: u64 = 10_000;
const IDLE_TTL: Duration = Duration::from_secs(3600);

pub struct CachedEmbedder {
    inner: Arc<dyn IEmbeddingProvider>,
    cache: Cache<String, Vec<f32>>,
}

impl CachedEmbedder {
    pub fn new(inner: Arc<dyn IEmbeddingProvider>, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(IDLE_TTL)
            .build();
        Self { inner, cache }
    }

    pub fn cache_key(model: &str, text: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(model.as_bytes());
        hasher.update(&[0]);
        hasher.update(text.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    pub fn contains(&self, model: &str, text: &str) -> bool {
        self.cache.contains_key(&Self::cache_key(model, text))
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl IEmbeddingProvider for CachedEmbedder {
    fn embed_batch(&self, texts: &[String], model: &str) -> DocentResult<Vec<Vec<f32>>> {
        let keys: Vec<String> = texts.iter().map(|t| Self::cache_key(model, t)).collect();
        let mut out: Vec<Option<Vec<f32>>> = keys.iter().map(|k| self.cache.get(k)).collect();

        let missing: Vec<usize> = (0..texts.len()).filter(|&i| out[i].is_none()).collect();
        if !missing.is_empty() {
            let batch: Vec<String> = missing.iter().map(|&i| texts[i].clone()).collect();
            let fresh = self.inner.embed_batch(&batch, model)?;
            if fresh.len() != batch.len() {
                return Err(EmbeddingError::CountMismatch {
                    expected: batch.len(),
                    actual: fresh.len(),
                }
                .into());
            }
            for (&i, vector) in missing.iter().zip(fresh) {
                self.cache.insert(keys[i].clone(), vector.clone());
                out[i] = Some(vector);
            }
        }
        debug!(
            component = "embedding_cache",
            requested = texts.len(),
            misses = missing.len(),
            "embedding batch served"
        );

        Ok(out.into_iter().flatten().collect())
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}
