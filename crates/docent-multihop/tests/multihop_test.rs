use std::sync::Arc;
use std::time::Duration;

use docent_core::config::{GraphConfig, RerankConfig, RetrievalConfig};
use docent_core::errors::{DocentResult, EmbeddingError};
use docent_core::models::{ChatRole, TraceVerdict, Verdict};
use docent_core::traits::{CompletionRequest, ICrossEncoder, IEmbeddingProvider};
use docent_core::{DocentConfig, RerankStrategy, SimilarityMetric, VerificationMode};
use docent_multihop::{LlmSettings, MultiHopOrchestrator, MultiHopRequest};
use docent_rerank::RerankEngine;
use docent_retrieval::{Bm25IndexBuilder, FlatVectorIndexBuilder};
use docent_session::{IndexBuilder, IndexOptions, SessionIndex};
use test_fixtures::{
    documents_from_fixture, FailingEmbedder, FailingLlm, KeywordEmbedder, ScriptedLlm, SlowLlm,
    StaticCrossEncoder,
};

const VOCAB: &[&str] = &["failover", "billing", "replication", "postgres"];

/// Keyword embedder that refuses texts containing "zebra".
struct PickyEmbedder(KeywordEmbedder);

impl IEmbeddingProvider for PickyEmbedder {
    fn embed_batch(&self, texts: &[String], model: &str) -> DocentResult<Vec<Vec<f32>>> {
        if texts.iter().any(|t| t.contains("zebra")) {
            return Err(EmbeddingError::InferenceFailed {
                reason: "unsupported text".into(),
            }
            .into());
        }
        self.0.embed_batch(texts, model)
    }

    fn name(&self) -> &str {
        "picky-fixture"
    }
}

fn picky() -> Arc<dyn IEmbeddingProvider> {
    Arc::new(PickyEmbedder(KeywordEmbedder::new(VOCAB)))
}

fn handbook_index(with_graph: bool) -> SessionIndex {
    let builder = IndexBuilder::new(
        Arc::new(KeywordEmbedder::new(VOCAB)),
        Arc::new(FlatVectorIndexBuilder),
        Arc::new(Bm25IndexBuilder),
    );
    let options = IndexOptions {
        chunk_size: 800,
        chunk_overlap: 120,
        embed_model: "fixture".into(),
        metric: SimilarityMetric::Cosine,
        build_graph: with_graph,
        entities_per_chunk: 5,
    };
    builder.build(&documents_from_fixture("ops_handbook"), &options).unwrap()
}

fn config() -> DocentConfig {
    let mut config = DocentConfig::default();
    config.features.graph_enabled = true;
    config
}

fn ce_reranker() -> Arc<RerankEngine> {
    let rerank = RerankConfig {
        strategy: RerankStrategy::CrossEncoder,
        ..RerankConfig::default()
    };
    let ce: Arc<dyn ICrossEncoder> = Arc::new(StaticCrossEncoder::new());
    Arc::new(RerankEngine::initialize(rerank, Some(ce), None).unwrap())
}

fn orchestrator(
    embedder: Arc<dyn IEmbeddingProvider>,
    llm: Option<LlmSettings>,
) -> MultiHopOrchestrator {
    MultiHopOrchestrator::new(
        RetrievalConfig::default(),
        GraphConfig::default(),
        ce_reranker(),
        embedder,
        llm,
    )
}

fn llm_settings(llm: Arc<dyn docent_core::traits::ILlmJudge>, timeout_ms: u64) -> LlmSettings {
    LlmSettings {
        llm,
        timeout: Duration::from_millis(timeout_ms),
        summary_max_tokens: 220,
        synthesis_max_tokens: 500,
    }
}

// ── Coverage and verification ──

#[test]
fn two_of_three_covered_is_partially_supported() {
    let req = MultiHopRequest {
        verification: Some(VerificationMode::Ragv),
        ..MultiHopRequest::new("Who approves failover? What pauses billing? zebra")
    };
    let plan = req.resolve(&config()).unwrap();
    let response = orchestrator(picky(), None)
        .run("s1", &handbook_index(false), &plan)
        .unwrap();

    assert_eq!(response.subqueries.len(), 3);
    assert!(response.subqueries[0].has_evidence());
    assert!(response.subqueries[1].has_evidence());
    assert!(!response.subqueries[2].has_evidence());

    let verification = response.verification.as_ref().unwrap();
    assert_eq!(verification.verdict, Verdict::PartiallySupported);
    assert!((verification.coverage - 0.667).abs() < 1e-3);
    assert_eq!(response.metrics.coverage, Some(verification.coverage));

    let trace = &response.trace;
    assert_eq!(trace.mode, "graph_advanced");
    assert_eq!(trace.session_id, "s1");
    assert_eq!(trace.planner_steps.len(), 3);
    assert_eq!(trace.planner_steps[2].hop, 2);
    assert_eq!(trace.verification.as_ref().unwrap().verdict, TraceVerdict::Weak);
    assert!(trace
        .warnings
        .contains(&"No evidence retrieved for sub-query 'zebra'.".to_string()));
    assert!(trace.warnings.iter().any(|w| w.starts_with("Embedding failed")));
    assert!(trace
        .warnings
        .contains(&"Verification indicated the answer may need review.".to_string()));

    assert!(response.answer.starts_with("1. "));
    assert!(response
        .answer
        .ends_with("3. No supporting evidence was found for zebra."));
}

#[test]
fn verification_off_by_default() {
    let plan = MultiHopRequest::new("Who approves failover").resolve(&config()).unwrap();
    let response = orchestrator(picky(), None)
        .run("s1", &handbook_index(false), &plan)
        .unwrap();
    assert!(response.verification.is_none());
    assert!(response.trace.verification.is_none());
    assert_eq!(response.metrics.verification_mode, VerificationMode::None);
}

// ── Candidates ──

#[test]
fn graph_candidates_survive_embedding_failure() {
    let plan = MultiHopRequest::new("Which team runs the Postgres Cluster")
        .resolve(&config())
        .unwrap();
    let response = orchestrator(Arc::new(FailingEmbedder), None)
        .run("s1", &handbook_index(true), &plan)
        .unwrap();

    let sub = &response.subqueries[0];
    assert!(sub.has_evidence());
    assert!(!sub.graph_paths.is_empty());
    assert!(sub.diagnostics.graph_candidates > 0);
    assert_eq!(sub.diagnostics.hybrid_candidates, 0);
    assert!(sub.diagnostics.seed_count >= 1);
    assert!(sub.diagnostics.hops_used <= plan.max_hops);
}

#[test]
fn cross_encoder_scores_are_reported() {
    let plan = MultiHopRequest::new("failover approval").resolve(&config()).unwrap();
    let response = orchestrator(picky(), None)
        .run("s1", &handbook_index(false), &plan)
        .unwrap();
    let sub = &response.subqueries[0];
    assert!(!sub.rerank_scores.is_empty());
    assert!(sub.retrieved[0].rerank_score.is_some());
    assert_eq!(sub.retrieved[0].rank, 1);
    assert_eq!(sub.citations[0].id, "S1");
    assert!(sub.citations.len() <= 3);
}

#[test]
fn trace_hits_are_capped() {
    let req = MultiHopRequest {
        k: Some(3),
        max_subqueries: Some(5),
        ..MultiHopRequest::new("failover. billing. replication. postgres. approval")
    };
    let plan = req.resolve(&config()).unwrap();
    let response = orchestrator(picky(), None)
        .run("s1", &handbook_index(false), &plan)
        .unwrap();
    assert_eq!(response.subqueries.len(), 5);
    assert_eq!(response.trace.retrieval_hits.len(), 12);
    assert!(response
        .trace
        .retrieval_hits
        .iter()
        .all(|h| h.snippet.chars().count() <= 200));
}

// ── LLM paths ──

fn is_synthesis(req: &CompletionRequest) -> bool {
    req.messages
        .iter()
        .any(|m| m.role == ChatRole::System && m.content.contains("combine sub-query answers"))
}

#[test]
fn llm_summaries_and_synthesis_are_used_when_enabled() {
    let llm = ScriptedLlm::new(|req| {
        if is_synthesis(req) {
            "Final answer [S1].".to_string()
        } else {
            "Summary [S1].".to_string()
        }
    });
    let llm = Arc::new(llm);
    let plan = MultiHopRequest::new("Who approves failover? What pauses billing")
        .resolve(&config())
        .unwrap();
    let response = orchestrator(picky(), Some(llm_settings(llm.clone(), 1_000)))
        .run("s1", &handbook_index(false), &plan)
        .unwrap();

    assert!(response.planner.llm_summary_enabled);
    assert!(response.subqueries.iter().all(|s| s.answer == "Summary [S1]."));
    assert_eq!(response.answer, "Final answer [S1].");
    assert_eq!(llm.requests().len(), 3);
    let summary_req = llm.requests().into_iter().find(|r| !is_synthesis(r)).unwrap();
    assert_eq!(summary_req.max_tokens, 220);
    assert!(summary_req.temperature <= 0.6);
}

#[test]
fn failing_llm_falls_back_to_extractive_text() {
    let plan = MultiHopRequest::new("Who approves failover").resolve(&config()).unwrap();
    let response = orchestrator(picky(), Some(llm_settings(Arc::new(FailingLlm), 1_000)))
        .run("s1", &handbook_index(false), &plan)
        .unwrap();

    let sub = &response.subqueries[0];
    assert!(sub.answer.contains("[S1]"));
    assert!(response.answer.starts_with("1. "));
    assert!(response.trace.warnings.iter().any(|w| w.contains("extractive")));
    assert!(response
        .trace
        .warnings
        .contains(&"Synthesis fell back to numbered sub-query answers.".to_string()));
}

#[test]
fn slow_llm_hits_the_deadline() {
    let slow = Arc::new(SlowLlm::new(Duration::from_millis(300), "late"));
    let plan = MultiHopRequest::new("Who approves failover").resolve(&config()).unwrap();
    let response = orchestrator(picky(), Some(llm_settings(slow, 20)))
        .run("s1", &handbook_index(false), &plan)
        .unwrap();
    assert_ne!(response.answer, "late");
    assert!(response.answer.starts_with("1. "));
}
