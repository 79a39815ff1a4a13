use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerStep {
    pub subquery: String,
    pub hop: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceHit {
    pub doc_id: String,
    pub score: f32,
    /// 1-based rank within its sub-query.
    pub rank: usize,
    pub snippet: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceVerdict {
    Pass,
    Weak,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceVerification {
    pub verdict: TraceVerdict,
    pub coverage: f32,
    pub notes: Option<String>,
}

/// Audit record of one request, kept in the bounded trace store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTrace {
    pub request_id: String,
    pub session_id: String,
    pub mode: String,
    pub created_at: DateTime<Utc>,
    pub planner_steps: Vec<PlannerStep>,
    pub retrieval_hits: Vec<TraceHit>,
    pub verification: Option<TraceVerification>,
    pub synthesis_notes: Option<String>,
    pub warnings: Vec<String>,
}
