//! Configuration for Docent.
//! Every section carries `#[serde(default)]`, so partial TOML files are valid.

pub mod answer_config;
pub mod defaults;
pub mod env;
pub mod feature_flags;
pub mod graph_config;
pub mod observability_config;
pub mod rerank_config;
pub mod retrieval_config;
pub mod session_config;

pub use answer_config::AnswerConfig;
pub use feature_flags::FeatureFlags;
pub use graph_config::GraphConfig;
pub use observability_config::ObservabilityConfig;
pub use rerank_config::RerankConfig;
pub use retrieval_config::RetrievalConfig;
pub use session_config::SessionConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{DocentError, DocentResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocentConfig {
    pub retrieval: RetrievalConfig,
    pub rerank: RerankConfig,
    pub graph: GraphConfig,
    pub features: FeatureFlags,
    pub answer: AnswerConfig,
    pub session: SessionConfig,
    pub observability: ObservabilityConfig,
}

impl DocentConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> DocentResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| DocentError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `DOCENT_*` environment overrides. Unrecognized values are logged and skipped.
    pub fn apply_env_overrides(&mut self) {
        env::apply(self, |key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        env::apply(self, lookup);
    }

    /// Reject combinations no component can work with.
    pub fn validate(&self) -> DocentResult<()> {
        let r = &self.retrieval;
        if !(0.0..=1.0).contains(&r.mmr_lambda) {
            return Err(DocentError::ConfigError(format!(
                "retrieval.mmr_lambda must be within [0, 1], got {}",
                r.mmr_lambda
            )));
        }
        if r.max_retrieved == 0 {
            return Err(DocentError::ConfigError(
                "retrieval.max_retrieved must be at least 1".into(),
            ));
        }
        if self.session.chunk_size == 0 {
            return Err(DocentError::ConfigError(
                "session.chunk_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
