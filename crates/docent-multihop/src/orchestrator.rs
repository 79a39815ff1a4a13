//! MultiHopOrchestrator: plan, gather and rerank per sub-query, then
//! summarize, aggregate and verify.
//!
//! Sub-queries run in parallel on the rayon pool; results keep plan order.
//! Every LLM call is deadline-bound and falls back to its deterministic
//! counterpart on failure, adding a trace warning instead of an error.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rayon::prelude::*;
use tracing::{info, warn};

use docent_answer::RetrievedChunk;
use docent_core::config::{AnswerConfig, GraphConfig, RetrievalConfig};
use docent_core::deadline::call_with_deadline;
use docent_core::errors::{DocentResult, SynthesisError};
use docent_core::models::{ChatMessage, PlannerStep, QueryTrace, TraceHit, TraceVerdict};
use docent_core::traits::{CompletionRequest, IEmbeddingProvider, ILlmJudge};
use docent_core::{RetrievalHit, SimilarityMetric};
use docent_graph::{match_entities, traverse_graph, GraphPath};
use docent_rerank::RerankEngine;
use docent_retrieval::index::l2_normalize;
use docent_retrieval::{HybridRetriever, RetrievalParams};
use docent_session::SessionIndex;

use crate::aggregate::{aggregate_fallback, collect_citations, synthesize_llm, NO_ANSWER};
use crate::merge::merge_hits;
use crate::planner::plan_subqueries;
use crate::request::MultiHopPlan;
use crate::response::{
    MultiHopMetrics, MultiHopResponse, PlannerInfo, SubQueryCitation, SubQueryDiagnostics,
    SubQueryResult,
};
use crate::summarize::{build_citations, no_evidence, summarize_extractive, summarize_llm};
use crate::verification::{compute_verification, coverage, to_trace_verification};

/// Trace hits kept per request.
pub const TRACE_MAX_HITS: usize = 12;
const TRACE_SNIPPET_CHARS: usize = 200;
pub const TRACE_MODE: &str = "graph_advanced";

/// LLM access for summaries and synthesis.
#[derive(Clone)]
pub struct LlmSettings {
    pub llm: Arc<dyn ILlmJudge>,
    pub timeout: Duration,
    pub summary_max_tokens: u32,
    pub synthesis_max_tokens: u32,
}

impl LlmSettings {
    pub fn from_config(llm: Arc<dyn ILlmJudge>, config: &AnswerConfig) -> Self {
        Self {
            llm,
            timeout: Duration::from_millis(config.llm_timeout_ms),
            summary_max_tokens: config.summary_max_tokens,
            synthesis_max_tokens: config.synthesis_max_tokens,
        }
    }

    /// One completion under the deadline. Blank replies count as failures.
    pub(crate) fn complete(
        &self,
        operation: &str,
        messages: Vec<ChatMessage>,
        model: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> DocentResult<String> {
        let llm = Arc::clone(&self.llm);
        let request = CompletionRequest {
            messages,
            model: model.to_string(),
            temperature,
            max_tokens,
        };
        let text = call_with_deadline(operation, self.timeout, move || {
            llm.complete(&request).map_err(Into::into)
        })?;
        let text = text.trim();
        if text.is_empty() {
            return Err(SynthesisError::EmptyCompletion.into());
        }
        Ok(text.to_string())
    }
}

struct SubQueryRun {
    result: SubQueryResult,
    warnings: Vec<String>,
}

pub struct MultiHopOrchestrator {
    retrieval: RetrievalConfig,
    graph: GraphConfig,
    reranker: Arc<RerankEngine>,
    embedder: Arc<dyn IEmbeddingProvider>,
    llm: Option<LlmSettings>,
}

impl MultiHopOrchestrator {
    /// `llm` is used only when given; pass `None` to force the extractive paths.
    pub fn new(
        retrieval: RetrievalConfig,
        graph: GraphConfig,
        reranker: Arc<RerankEngine>,
        embedder: Arc<dyn IEmbeddingProvider>,
        llm: Option<LlmSettings>,
    ) -> Self {
        Self {
            retrieval,
            graph,
            reranker,
            embedder,
            llm: llm.filter(|s| s.llm.is_available()),
        }
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// Run a resolved plan against one session index.
    pub fn run(
        &self,
        session_id: &str,
        index: &SessionIndex,
        plan: &MultiHopPlan,
    ) -> DocentResult<MultiHopResponse> {
        let request_id = uuid::Uuid::new_v4().simple().to_string();
        let mut subqueries = plan_subqueries(&plan.query, plan.max_subqueries);
        if subqueries.is_empty() {
            subqueries.push(plan.query.clone());
        }

        let runs: Vec<SubQueryRun> = subqueries
            .par_iter()
            .map(|sq| self.run_subquery(sq, index, plan))
            .collect::<DocentResult<Vec<_>>>()?;

        let mut warnings = Vec::new();
        let mut results = Vec::with_capacity(runs.len());
        for run in runs {
            warnings.extend(run.warnings);
            results.push(run.result);
        }

        let (answer, citations) = self.aggregate(plan, &results, &mut warnings);
        let coverage_value = coverage(&results);
        let verification = compute_verification(plan.verification, coverage_value);

        let metrics = MultiHopMetrics {
            hops_used: results.iter().map(|r| r.diagnostics.hops_used).max().unwrap_or(0),
            graph_candidates: results.iter().map(|r| r.diagnostics.graph_candidates).sum(),
            hybrid_candidates: results.iter().map(|r| r.diagnostics.hybrid_candidates).sum(),
            rerank_latency_ms: results.iter().map(|r| r.diagnostics.rerank_latency_ms).sum(),
            rerank_strategy: plan.rerank,
            verification_mode: plan.verification,
            subqueries: results.len(),
            coverage: verification.as_ref().map(|v| v.coverage),
        };

        let trace_verification = verification.as_ref().map(to_trace_verification);
        let mut notes = format!(
            "Combined {} sub-queries with rerank='{}'.",
            results.len(),
            plan.rerank
        );
        if let Some(v) = &verification {
            notes.push_str(&format!(
                " Verification mode '{}' produced verdict '{}'.",
                v.mode.as_str(),
                v.verdict.as_str()
            ));
        }
        if trace_verification
            .as_ref()
            .is_some_and(|t| t.verdict != TraceVerdict::Pass)
        {
            warnings.push("Verification indicated the answer may need review.".to_string());
        }

        let trace = QueryTrace {
            request_id,
            session_id: session_id.to_string(),
            mode: TRACE_MODE.to_string(),
            created_at: Utc::now(),
            planner_steps: subqueries
                .iter()
                .enumerate()
                .map(|(hop, sq)| PlannerStep {
                    subquery: sq.clone(),
                    hop,
                })
                .collect(),
            retrieval_hits: trace_hits(&results),
            verification: trace_verification,
            synthesis_notes: Some(notes),
            warnings,
        };

        info!(
            component = "multihop",
            session_id,
            request_id = %trace.request_id,
            subqueries = results.len(),
            rerank = %plan.rerank,
            verification = plan.verification.as_str(),
            hops_used = metrics.hops_used,
            graph_candidates = metrics.graph_candidates,
            hybrid_candidates = metrics.hybrid_candidates,
            rerank_latency_ms = metrics.rerank_latency_ms,
            answer_chars = answer.chars().count(),
            "multi-hop query complete"
        );

        Ok(MultiHopResponse {
            session_id: session_id.to_string(),
            query: plan.query.clone(),
            planner: PlannerInfo {
                subqueries,
                temperature: plan.temperature,
                k: plan.k,
                llm_summary_enabled: self.llm_enabled(),
                model: plan.model.clone(),
            },
            subqueries: results,
            answer,
            citations,
            verification,
            metrics,
            trace,
        })
    }

    fn run_subquery(
        &self,
        sub_query: &str,
        index: &SessionIndex,
        plan: &MultiHopPlan,
    ) -> DocentResult<SubQueryRun> {
        let mut warnings = Vec::new();
        let mut diagnostics = SubQueryDiagnostics::default();

        let (graph_hits, graph_paths) =
            self.graph_candidates(sub_query, index, plan, &mut diagnostics);
        let hybrid_hits = match self.embed_query(sub_query, index) {
            Ok(query_vec) => {
                let answer_top_k = plan.k.max(self.retrieval.answer_top_k);
                let params = RetrievalParams::from_config(&self.retrieval, answer_top_k);
                let retriever = HybridRetriever::new(params);
                let (hits, _) = retriever.retrieve(&index.corpus(), sub_query, &query_vec)?;
                hits
            }
            Err(e) => {
                warn!(
                    component = "multihop",
                    sub_query,
                    error = %e,
                    "query embedding failed, graph candidates only"
                );
                warnings.push(format!(
                    "Embedding failed for sub-query '{sub_query}'; used graph candidates only."
                ));
                Vec::new()
            }
        };
        diagnostics.hybrid_candidates = hybrid_hits.len();

        let limit = plan.k.max(self.retrieval.max_retrieved);
        let mut hits = merge_hits(&graph_hits, &hybrid_hits, limit);

        let mut rerank_scores = Vec::new();
        if !hits.is_empty() {
            let outcome = self
                .reranker
                .rerank(sub_query, &mut hits, &index.chunks, Some(plan.rerank));
            diagnostics.rerank_latency_ms = outcome.latency_ms;
            if !outcome.applied() {
                warnings.push(format!(
                    "Rerank '{}' did not apply to sub-query '{sub_query}'; kept retrieval order.",
                    plan.rerank
                ));
            }
            rerank_scores = outcome.scores;
        }

        let retrieved: Vec<RetrievedChunk> = hits
            .iter()
            .take(plan.k)
            .enumerate()
            .filter_map(|(i, hit)| RetrievedChunk::from_hit(i + 1, hit, index, None))
            .collect();
        if retrieved.is_empty() {
            warnings.push(format!("No evidence retrieved for sub-query '{sub_query}'."));
        }

        let citations = build_citations(&retrieved);
        let answer = if citations.is_empty() {
            no_evidence(sub_query)
        } else {
            match &self.llm {
                Some(settings) => match summarize_llm(
                    settings,
                    &plan.model,
                    plan.summary_temperature,
                    sub_query,
                    &retrieved,
                    &citations,
                ) {
                    Ok(summary) => summary,
                    Err(e) => {
                        warn!(
                            component = "multihop",
                            sub_query,
                            error = %e,
                            "summary LLM failed, using extractive summary"
                        );
                        warnings.push(format!(
                            "Summary for sub-query '{sub_query}' fell back to extractive text."
                        ));
                        summarize_extractive(sub_query, &retrieved, &citations)
                    }
                },
                None => summarize_extractive(sub_query, &retrieved, &citations),
            }
        };

        Ok(SubQueryRun {
            result: SubQueryResult {
                query: sub_query.to_string(),
                retrieved,
                graph_paths,
                rerank_scores,
                diagnostics,
                answer,
                citations,
            },
            warnings,
        })
    }

    fn graph_candidates(
        &self,
        sub_query: &str,
        index: &SessionIndex,
        plan: &MultiHopPlan,
        diagnostics: &mut SubQueryDiagnostics,
    ) -> (Vec<RetrievalHit>, Vec<GraphPath>) {
        let Some(store) = index.graph.as_deref() else {
            return (Vec::new(), Vec::new());
        };
        let seeds = match_entities(store, sub_query, self.graph.max_seed_matches);
        let traversal = traverse_graph(store, &seeds, plan.max_hops, self.graph.max_sections);
        diagnostics.hops_used = traversal.hops_used;
        diagnostics.seed_count = traversal.seed_count;
        diagnostics.graph_candidates = traversal.chunk_indices.len();
        let hits = traversal
            .chunk_indices
            .iter()
            .map(|&idx| RetrievalHit::new(idx, 0.0, 0.0, 0.0))
            .collect();
        (hits, traversal.paths)
    }

    fn embed_query(&self, sub_query: &str, index: &SessionIndex) -> DocentResult<Vec<f32>> {
        let mut vec = self.embedder.embed(sub_query, &index.embed_model)?;
        if index.metric == SimilarityMetric::Cosine {
            l2_normalize(&mut vec);
        }
        Ok(vec)
    }

    fn aggregate(
        &self,
        plan: &MultiHopPlan,
        results: &[SubQueryResult],
        warnings: &mut Vec<String>,
    ) -> (String, Vec<SubQueryCitation>) {
        if results.is_empty() {
            return (NO_ANSWER.to_string(), Vec::new());
        }
        if let Some(settings) = &self.llm {
            match synthesize_llm(settings, &plan.model, plan.temperature, &plan.query, results) {
                Ok(answer) => return (answer, collect_citations(results)),
                Err(e) => {
                    warn!(
                        component = "multihop",
                        error = %e,
                        "synthesis LLM failed, using numbered sub-answers"
                    );
                    warnings.push("Synthesis fell back to numbered sub-query answers.".to_string());
                }
            }
        }
        aggregate_fallback(results)
    }
}

fn trace_hits(results: &[SubQueryResult]) -> Vec<TraceHit> {
    results
        .iter()
        .flat_map(|r| r.retrieved.iter())
        .take(TRACE_MAX_HITS)
        .map(|r| TraceHit {
            doc_id: r.doc_id.clone(),
            score: r.rerank_score.unwrap_or(r.fused_score),
            rank: r.rank,
            snippet: short_snippet(&r.text, TRACE_SNIPPET_CHARS),
        })
        .collect()
}

/// Single-line snippet of at most `limit` chars, ellipsized when cut.
fn short_snippet(text: &str, limit: usize) -> String {
    let flat = text.replace('\n', " ");
    let flat = flat.trim();
    if flat.chars().count() <= limit {
        return flat.to_string();
    }
    let mut cut: String = flat.chars().take(limit.saturating_sub(1)).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_snippet_flattens_and_cuts() {
        assert_eq!(short_snippet("a\nb", 200), "a b");
        let long = "x".repeat(300);
        let cut = short_snippet(&long, 200);
        assert_eq!(cut.chars().count(), 200);
        assert!(cut.ends_with('…'));
    }
}
