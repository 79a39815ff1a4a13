use serde::{Deserialize, Serialize};

use super::defaults;

/// Capability switches checked before any retrieval work begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub graph_enabled: bool,
    pub llm_rerank_enabled: bool,
    pub fact_check_llm_enabled: bool,
    /// Default multi-hop verification to `ragv`.
    pub fact_check_strict: bool,
    /// Use the LLM for sub-query summaries and final synthesis.
    pub advanced_llm_enabled: bool,
    pub answer_confidence_enabled: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            graph_enabled: defaults::DEFAULT_GRAPH_ENABLED,
            llm_rerank_enabled: defaults::DEFAULT_LLM_RERANK_ENABLED,
            fact_check_llm_enabled: defaults::DEFAULT_FACT_CHECK_LLM_ENABLED,
            fact_check_strict: defaults::DEFAULT_FACT_CHECK_STRICT,
            advanced_llm_enabled: defaults::DEFAULT_ADVANCED_LLM_ENABLED,
            answer_confidence_enabled: defaults::DEFAULT_ANSWER_CONFIDENCE_ENABLED,
        }
    }
}
