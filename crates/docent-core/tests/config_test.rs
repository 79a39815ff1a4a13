use docent_core::config::defaults;
use docent_core::models::{AnswerMode, RerankStrategy, RetrievalStrategy, SimilarityMetric};
use docent_core::{DocentConfig, DocentError};

#[test]
fn defaults_match_documented_values() {
    let cfg = DocentConfig::default();
    assert_eq!(cfg.retrieval.strategy, RetrievalStrategy::Hybrid);
    assert_eq!(cfg.retrieval.dense_k, 40);
    assert_eq!(cfg.retrieval.lexical_k, 40);
    assert_eq!(cfg.retrieval.fusion_rrf_k, 60);
    assert_eq!(cfg.retrieval.answer_top_k, 6);
    assert_eq!(cfg.retrieval.max_retrieved, 12);
    assert!(cfg.retrieval.use_mmr);
    assert!((cfg.retrieval.similarity_floor - 0.18).abs() < f32::EPSILON);
    assert_eq!(cfg.retrieval.metric, SimilarityMetric::Cosine);
    assert_eq!(cfg.rerank.strategy, RerankStrategy::None);
    assert!(!cfg.rerank.strict);
    assert_eq!(cfg.graph.max_graph_hops, 2);
    assert_eq!(cfg.graph.max_subqueries, 3);
    assert!(!cfg.features.graph_enabled);
    assert!(cfg.features.answer_confidence_enabled);
    assert_eq!(cfg.answer.mode, AnswerMode::Grounded);
    assert_eq!(cfg.session.chunk_size, defaults::DEFAULT_CHUNK_SIZE);
    assert_eq!(cfg.observability.trace_cache_size, 200);
}

#[test]
fn partial_toml_keeps_defaults() {
    let cfg = DocentConfig::from_toml(
        r#"
        [retrieval]
        dense_k = 10
        metric = "l2"

        [rerank]
        strategy = "ce"
        strict = true
        "#,
    )
    .unwrap();
    assert_eq!(cfg.retrieval.dense_k, 10);
    assert_eq!(cfg.retrieval.lexical_k, 40);
    assert_eq!(cfg.retrieval.metric, SimilarityMetric::L2);
    assert_eq!(cfg.rerank.strategy, RerankStrategy::CrossEncoder);
    assert!(cfg.rerank.strict);
    assert_eq!(cfg.graph.max_graph_hops, 2);
}

#[test]
fn empty_toml_is_default() {
    let cfg = DocentConfig::from_toml("").unwrap();
    assert_eq!(cfg.retrieval.dense_k, defaults::DEFAULT_DENSE_K);
}

#[test]
fn unknown_strategy_is_config_error() {
    let err = DocentConfig::from_toml("[rerank]\nstrategy = \"magic\"\n").unwrap_err();
    assert!(matches!(err, DocentError::ConfigError(_)));
    assert!(err.is_client_error());
}

#[test]
fn out_of_range_lambda_is_rejected() {
    let err = DocentConfig::from_toml("[retrieval]\nmmr_lambda = 1.5\n").unwrap_err();
    assert!(err.to_string().contains("mmr_lambda"));
}

#[test]
fn trace_cache_size_is_clamped() {
    let mut cfg = DocentConfig::default();
    cfg.observability.trace_cache_size = 3;
    assert_eq!(cfg.observability.effective_trace_cache_size(), 20);
}

#[test]
fn overrides_from_lookup() {
    let mut cfg = DocentConfig::default();
    cfg.apply_overrides_from(|key| match key {
        "DOCENT_FACT_CHECK_STRICT" => Some("on".into()),
        "DOCENT_TRACE_CACHE_SIZE" => Some("64".into()),
        _ => None,
    });
    assert!(cfg.features.fact_check_strict);
    assert_eq!(cfg.observability.trace_cache_size, 64);
}
