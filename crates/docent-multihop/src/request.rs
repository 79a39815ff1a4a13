//! Multi-hop request resolution against configuration and feature flags.

use serde::{Deserialize, Serialize};

use docent_core::config::defaults::MAX_SUMMARY_TEMPERATURE;
use docent_core::errors::{DocentError, DocentResult};
use docent_core::{DocentConfig, RerankStrategy, VerificationMode};

/// Caller-supplied options; unset fields take configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiHopRequest {
    pub query: String,
    pub max_hops: Option<usize>,
    pub k: Option<usize>,
    pub max_subqueries: Option<usize>,
    pub temperature: Option<f32>,
    pub model: Option<String>,
    pub rerank: Option<RerankStrategy>,
    pub verification: Option<VerificationMode>,
}

impl MultiHopRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// A validated request with every option resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiHopPlan {
    pub query: String,
    pub max_hops: usize,
    pub k: usize,
    pub max_subqueries: usize,
    /// Synthesis temperature.
    pub temperature: f32,
    /// Sub-query summary temperature, clamped.
    pub summary_temperature: f32,
    pub model: String,
    pub rerank: RerankStrategy,
    pub verification: VerificationMode,
}

impl MultiHopRequest {
    /// Validate and resolve. Disabled capabilities and empty queries are
    /// rejected here, before any retrieval work.
    pub fn resolve(&self, config: &DocentConfig) -> DocentResult<MultiHopPlan> {
        let features = &config.features;
        if !features.graph_enabled {
            return Err(DocentError::disabled("graph"));
        }
        let query = self.query.trim();
        if query.is_empty() {
            return Err(DocentError::invalid_input("query text is required"));
        }

        let rerank = match self.rerank {
            Some(RerankStrategy::LlmJudge) => RerankStrategy::LlmJudge,
            _ => RerankStrategy::CrossEncoder,
        };
        if rerank == RerankStrategy::LlmJudge
            && !(features.llm_rerank_enabled && features.advanced_llm_enabled)
        {
            return Err(DocentError::disabled("llm_rerank"));
        }

        let default_verification = if features.fact_check_strict {
            VerificationMode::Ragv
        } else {
            VerificationMode::None
        };
        let verification = self.verification.unwrap_or(default_verification);
        if verification == VerificationMode::Llm
            && !(features.fact_check_llm_enabled && features.advanced_llm_enabled)
        {
            return Err(DocentError::disabled("llm_verification"));
        }

        let graph = &config.graph;
        let k = self
            .k
            .unwrap_or(graph.default_k)
            .clamp(1, config.retrieval.max_retrieved.max(1));
        let temperature = self.temperature.unwrap_or(graph.default_temperature);
        let summary_temperature = temperature.clamp(0.0, MAX_SUMMARY_TEMPERATURE);
        let model = self
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(&config.rerank.llm_model)
            .to_string();

        Ok(MultiHopPlan {
            query: query.to_string(),
            max_hops: self.max_hops.unwrap_or(graph.max_graph_hops).max(1),
            k,
            max_subqueries: self.max_subqueries.unwrap_or(graph.max_subqueries).max(1),
            temperature,
            summary_temperature,
            model,
            rerank,
            verification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> DocentConfig {
        let mut config = DocentConfig::default();
        config.features.graph_enabled = true;
        config
    }

    #[test]
    fn graph_disabled_is_configuration_error() {
        let err = MultiHopRequest::new("q").resolve(&DocentConfig::default()).unwrap_err();
        assert!(matches!(err, DocentError::CapabilityDisabled { .. }));
    }

    #[test]
    fn defaults_resolve_from_config() {
        let plan = MultiHopRequest::new("  who owns billing?  ").resolve(&enabled()).unwrap();
        assert_eq!(plan.query, "who owns billing?");
        assert_eq!(plan.k, 6);
        assert_eq!(plan.max_hops, 2);
        assert_eq!(plan.max_subqueries, 3);
        assert_eq!(plan.rerank, RerankStrategy::CrossEncoder);
        assert_eq!(plan.verification, VerificationMode::None);
        assert_eq!(plan.model, "gpt-4o-mini");
    }

    #[test]
    fn k_and_temperature_are_clamped() {
        let req = MultiHopRequest {
            k: Some(500),
            temperature: Some(1.4),
            ..MultiHopRequest::new("q")
        };
        let plan = req.resolve(&enabled()).unwrap();
        assert_eq!(plan.k, 12);
        assert_eq!(plan.temperature, 1.4);
        assert_eq!(plan.summary_temperature, 0.6);

        let zero = MultiHopRequest {
            k: Some(0),
            ..MultiHopRequest::new("q")
        };
        assert_eq!(zero.resolve(&enabled()).unwrap().k, 1);
    }

    #[test]
    fn llm_capabilities_need_flags() {
        let llm_rerank = MultiHopRequest {
            rerank: Some(RerankStrategy::LlmJudge),
            ..MultiHopRequest::new("q")
        };
        assert!(matches!(
            llm_rerank.resolve(&enabled()),
            Err(DocentError::CapabilityDisabled { .. })
        ));

        let llm_verify = MultiHopRequest {
            verification: Some(VerificationMode::Llm),
            ..MultiHopRequest::new("q")
        };
        assert!(llm_verify.resolve(&enabled()).is_err());

        let mut config = enabled();
        config.features.llm_rerank_enabled = true;
        config.features.advanced_llm_enabled = true;
        assert_eq!(llm_rerank.resolve(&config).unwrap().rerank, RerankStrategy::LlmJudge);
    }

    #[test]
    fn strict_fact_check_defaults_to_ragv() {
        let mut config = enabled();
        config.features.fact_check_strict = true;
        let plan = MultiHopRequest::new("q").resolve(&config).unwrap();
        assert_eq!(plan.verification, VerificationMode::Ragv);
    }

    #[test]
    fn empty_query_is_input_error() {
        let err = MultiHopRequest::new("  ").resolve(&enabled()).unwrap_err();
        assert!(err.is_client_error());
        assert!(matches!(err, DocentError::InvalidInput { .. }));
    }
}
