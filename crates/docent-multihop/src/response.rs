use serde::{Deserialize, Serialize};

use docent_answer::RetrievedChunk;
use docent_core::models::{QueryTrace, VerificationSummary};
use docent_core::{RerankStrategy, VerificationMode};
use docent_graph::GraphPath;

/// Citation of one sub-query snippet, id `S<rank>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubQueryCitation {
    pub id: String,
    pub doc_id: String,
    pub chunk_index: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubQueryDiagnostics {
    pub hops_used: usize,
    pub seed_count: usize,
    pub graph_candidates: usize,
    pub hybrid_candidates: usize,
    pub rerank_latency_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubQueryResult {
    pub query: String,
    pub retrieved: Vec<RetrievedChunk>,
    pub graph_paths: Vec<GraphPath>,
    pub rerank_scores: Vec<f32>,
    pub diagnostics: SubQueryDiagnostics,
    pub answer: String,
    pub citations: Vec<SubQueryCitation>,
}

impl SubQueryResult {
    pub fn has_evidence(&self) -> bool {
        !self.retrieved.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerInfo {
    pub subqueries: Vec<String>,
    pub temperature: f32,
    pub k: usize,
    pub llm_summary_enabled: bool,
    pub model: String,
}

/// Per-request totals for the metrics log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiHopMetrics {
    /// Deepest hop over all sub-queries.
    pub hops_used: usize,
    pub graph_candidates: usize,
    pub hybrid_candidates: usize,
    pub rerank_latency_ms: u64,
    pub rerank_strategy: RerankStrategy,
    pub verification_mode: VerificationMode,
    pub subqueries: usize,
    pub coverage: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiHopResponse {
    pub session_id: String,
    pub query: String,
    pub planner: PlannerInfo,
    pub subqueries: Vec<SubQueryResult>,
    pub answer: String,
    pub citations: Vec<SubQueryCitation>,
    pub verification: Option<VerificationSummary>,
    pub metrics: MultiHopMetrics,
    pub trace: QueryTrace,
}
