use serde::{Deserialize, Serialize};

/// Verification heuristic selected for a multi-hop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMode {
    None,
    Ragv,
    Llm,
}

impl VerificationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ragv => "ragv",
            Self::Llm => "llm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    FullySupported,
    Supported,
    PartiallySupported,
    Insufficient,
    Unclear,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullySupported => "fully-supported",
            Self::Supported => "supported",
            Self::PartiallySupported => "partially-supported",
            Self::Insufficient => "insufficient",
            Self::Unclear => "unclear",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub mode: VerificationMode,
    pub verdict: Verdict,
    /// Fraction of sub-queries with retrieved evidence, in `[0, 1]`.
    pub coverage: f32,
    pub notes: Option<String>,
}
