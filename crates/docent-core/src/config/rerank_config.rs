use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::RerankStrategy;

/// Rerank engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankConfig {
    /// Configured strategy. The effective one may differ after initialization.
    pub strategy: RerankStrategy,
    /// Make cross-encoder initialization failure fatal.
    pub strict: bool,
    pub top_n: usize,
    pub keep: usize,
    /// Characters of chunk text shown to the LLM judge per candidate.
    pub llm_max_chars: usize,
    pub llm_model: String,
    pub timeout_ms: u64,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self {
            strategy: RerankStrategy::None,
            strict: defaults::DEFAULT_RERANK_STRICT,
            top_n: defaults::DEFAULT_RERANK_TOP_N,
            keep: defaults::DEFAULT_RERANK_KEEP,
            llm_max_chars: defaults::DEFAULT_RERANK_LLM_MAX_CHARS,
            llm_model: defaults::DEFAULT_RERANK_LLM_MODEL.to_string(),
            timeout_ms: defaults::DEFAULT_RERANK_TIMEOUT_MS,
        }
    }
}
