use serde::{Deserialize, Serialize};

/// How the answer LLM may use knowledge outside the sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerMode {
    /// Sources only.
    Grounded,
    /// Sources first, with clearly marked model-prior notes.
    Blended,
}

/// Discrete confidence label. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMeta {
    pub doc_id: String,
    pub span: (usize, usize),
    pub chunk_index: usize,
}

/// A numbered source handed to the answer step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSource {
    /// Citation id, contiguous from 1.
    pub id: usize,
    pub text: String,
    pub meta: SourceMeta,
}

/// Citation id plus metadata, without the chunk text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationEntry {
    pub id: usize,
    pub meta: SourceMeta,
}
