use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::AnswerMode;

/// Answer composition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerConfig {
    pub mode: AnswerMode,
    pub tone: String,
    pub markdown: bool,
    pub model: String,
    pub temperature: f32,
    pub summary_max_tokens: u32,
    pub synthesis_max_tokens: u32,
    pub llm_timeout_ms: u64,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            mode: AnswerMode::Grounded,
            tone: defaults::DEFAULT_ANSWER_TONE.to_string(),
            markdown: defaults::DEFAULT_ANSWER_MARKDOWN,
            model: defaults::DEFAULT_ANSWER_MODEL.to_string(),
            temperature: defaults::DEFAULT_ANSWER_TEMPERATURE,
            summary_max_tokens: defaults::DEFAULT_SUMMARY_MAX_TOKENS,
            synthesis_max_tokens: defaults::DEFAULT_SYNTHESIS_MAX_TOKENS,
            llm_timeout_ms: defaults::DEFAULT_LLM_TIMEOUT_MS,
        }
    }
}
