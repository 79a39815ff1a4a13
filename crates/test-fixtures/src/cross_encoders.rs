use docent_core::errors::RerankError;
use docent_core::traits::ICrossEncoder;

/// Scores each candidate by how many of the query's words it contains,
/// plus a per-text override when one is registered.
#[derive(Debug, Default)]
pub struct StaticCrossEncoder {
    overrides: Vec<(String, f32)>,
}

impl StaticCrossEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates containing `needle` score `score`.
    pub fn with_score(mut self, needle: &str, score: f32) -> Self {
        self.overrides.push((needle.to_string(), score));
        self
    }
}

impl ICrossEncoder for StaticCrossEncoder {
    fn predict(&self, query: &str, candidates: &[String]) -> Result<Vec<f32>, RerankError> {
        let words: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Ok(candidates
            .iter()
            .map(|c| {
                if let Some((_, s)) = self.overrides.iter().find(|(n, _)| c.contains(n.as_str())) {
                    return *s;
                }
                let lower = c.to_lowercase();
                words.iter().filter(|w| lower.contains(w.as_str())).count() as f32
            })
            .collect())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn model_id(&self) -> &str {
        "static-fixture"
    }
}

/// Reports itself unavailable, as if the model failed to load.
#[derive(Debug, Default)]
pub struct UnavailableCrossEncoder;

impl ICrossEncoder for UnavailableCrossEncoder {
    fn predict(&self, _query: &str, _candidates: &[String]) -> Result<Vec<f32>, RerankError> {
        Err(RerankError::InitFailed {
            model: self.model_id().to_string(),
            reason: "model not loaded".into(),
        })
    }

    fn is_available(&self) -> bool {
        false
    }

    fn model_id(&self) -> &str {
        "unavailable-fixture"
    }
}

/// Available, but every prediction fails.
#[derive(Debug, Default)]
pub struct FailingCrossEncoder;

impl ICrossEncoder for FailingCrossEncoder {
    fn predict(&self, _query: &str, _candidates: &[String]) -> Result<Vec<f32>, RerankError> {
        Err(RerankError::InferenceFailed {
            reason: "fixture failure".into(),
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn model_id(&self) -> &str {
        "failing-fixture"
    }
}
