use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which retrieval signals feed the fused ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStrategy {
    Dense,
    Hybrid,
}

/// Similarity metric of the vector index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// Inner product over L2-normalized vectors.
    Cosine,
    /// Negative Euclidean distance. Scores are not calibrated against a floor.
    L2,
}

impl SimilarityMetric {
    /// Whether scores from this metric can be compared against a similarity floor.
    pub fn is_calibrated(self) -> bool {
        matches!(self, Self::Cosine)
    }
}

/// Secondary ranking strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RerankStrategy {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "ce")]
    CrossEncoder,
    #[serde(rename = "llm")]
    LlmJudge,
}

impl RerankStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::CrossEncoder => "ce",
            Self::LlmJudge => "llm",
        }
    }
}

impl fmt::Display for RerankStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RerankStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "ce" | "cross-encoder" | "cross_encoder" => Ok(Self::CrossEncoder),
            "llm" => Ok(Self::LlmJudge),
            other => Err(format!("unknown rerank strategy: {other}")),
        }
    }
}
