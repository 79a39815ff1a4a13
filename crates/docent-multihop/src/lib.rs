//! # docent-multihop
//!
//! Multi-hop question answering over one session index. A query is split
//! into sub-queries; each gathers graph and hybrid candidates, reranks them
//! and is summarized. The summaries are aggregated into one answer and the
//! evidence coverage is turned into a verification verdict.

pub mod aggregate;
pub mod merge;
pub mod orchestrator;
pub mod planner;
pub mod request;
pub mod response;
pub mod summarize;
pub mod verification;

pub use aggregate::{aggregate_fallback, collect_citations, NO_ANSWER};
pub use merge::merge_hits;
pub use orchestrator::{LlmSettings, MultiHopOrchestrator};
pub use planner::plan_subqueries;
pub use request::{MultiHopPlan, MultiHopRequest};
pub use response::{
    MultiHopMetrics, MultiHopResponse, PlannerInfo, SubQueryCitation, SubQueryDiagnostics,
    SubQueryResult,
};
pub use summarize::{build_citations, summarize_extractive};
pub use verification::{compute_verification, coverage, to_trace_verification};
