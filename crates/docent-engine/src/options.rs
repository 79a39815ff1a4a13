use std::sync::Arc;

use docent_core::errors::DocentResult;
use docent_core::traits::{ICrossEncoder, IEmbeddingProvider, ILlmJudge};
use docent_core::DocentConfig;
use docent_providers::cached::DEFAULT_CACHE_ENTRIES;

/// Options for building a [`crate::DocentRuntime`].
pub struct RuntimeOptions {
    pub config: DocentConfig,
    /// Defaults to the offline hashing embedder.
    pub embedder: Option<Arc<dyn IEmbeddingProvider>>,
    pub cross_encoder: Option<Arc<dyn ICrossEncoder>>,
    /// Chat model used for answers, LLM rerank, summaries and synthesis.
    pub llm: Option<Arc<dyn ILlmJudge>>,
    /// Entries in the query embedding cache. 0 disables the cache.
    pub embedding_cache_entries: u64,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            config: DocentConfig::default(),
            embedder: None,
            cross_encoder: None,
            llm: None,
            embedding_cache_entries: DEFAULT_CACHE_ENTRIES,
        }
    }
}

impl RuntimeOptions {
    /// Config from TOML plus `DOCENT_*` environment overrides.
    pub fn from_toml(toml_str: &str) -> DocentResult<Self> {
        let mut config = DocentConfig::from_toml(toml_str)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn with_config(mut self, config: DocentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn IEmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn with_cross_encoder(mut self, cross_encoder: Arc<dyn ICrossEncoder>) -> Self {
        self.cross_encoder = Some(cross_encoder);
        self
    }

    pub fn with_llm(mut self, llm: Arc<dyn ILlmJudge>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn without_embedding_cache(mut self) -> Self {
        self.embedding_cache_entries = 0;
        self
    }
}
