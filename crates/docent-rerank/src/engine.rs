//! Rerank strategy resolution and per-request reranking.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use docent_core::config::RerankConfig;
use docent_core::errors::{DocentResult, RerankError};
use docent_core::traits::{ICrossEncoder, ILlmJudge};
use docent_core::{Chunk, RerankStrategy, RetrievalHit};

use crate::cross_encoder::rerank_cross_encoder;
use crate::llm_judge::rerank_llm;
use crate::splice::splice;

/// What a rerank call did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RerankOutcome {
    /// Strategy actually used for this call.
    pub strategy: RerankStrategy,
    /// Scores of the kept hits, in their new order. Empty when nothing was reranked.
    pub scores: Vec<f32>,
    pub latency_ms: u64,
}

impl RerankOutcome {
    pub fn applied(&self) -> bool {
        !self.scores.is_empty()
    }
}

/// Strategy-selectable reranker. Cheap to share behind an `Arc`.
pub struct RerankEngine {
    config: RerankConfig,
    effective: RerankStrategy,
    cross_encoder: Option<Arc<dyn ICrossEncoder>>,
    llm: Option<Arc<dyn ILlmJudge>>,
}

impl RerankEngine {
    /// Resolve the configured strategy against what is available.
    ///
    /// An unavailable cross-encoder downgrades the effective strategy to
    /// `none`, or fails here when `config.strict` is set.
    pub fn initialize(
        config: RerankConfig,
        cross_encoder: Option<Arc<dyn ICrossEncoder>>,
        llm: Option<Arc<dyn ILlmJudge>>,
    ) -> DocentResult<Self> {
        let effective = match config.strategy {
            RerankStrategy::None => RerankStrategy::None,
            RerankStrategy::CrossEncoder => {
                if ce_ready(cross_encoder.as_ref()) {
                    RerankStrategy::CrossEncoder
                } else {
                    let model = cross_encoder
                        .as_ref()
                        .map(|ce| ce.model_id().to_string())
                        .unwrap_or_else(|| "unconfigured".to_string());
                    if config.strict {
                        return Err(RerankError::InitFailed {
                            model,
                            reason: "cross-encoder unavailable and rerank.strict is set".into(),
                        }
                        .into());
                    }
                    warn!(
                        component = "rerank",
                        model = %model,
                        "cross-encoder failed to load, continuing without rerank"
                    );
                    RerankStrategy::None
                }
            }
            RerankStrategy::LlmJudge => {
                if llm_ready(llm.as_ref()) {
                    RerankStrategy::LlmJudge
                } else {
                    warn!(component = "rerank", "llm judge unavailable, continuing without rerank");
                    RerankStrategy::None
                }
            }
        };
        info!(
            component = "rerank",
            configured = %config.strategy,
            effective = %effective,
            top_n = config.top_n,
            keep = config.keep,
            "rerank engine initialized"
        );
        Ok(Self {
            config,
            effective,
            cross_encoder,
            llm,
        })
    }

    pub fn configured_strategy(&self) -> RerankStrategy {
        self.config.strategy
    }

    pub fn effective_strategy(&self) -> RerankStrategy {
        self.effective
    }

    pub fn cross_encoder_model(&self) -> Option<&str> {
        self.cross_encoder.as_ref().map(|ce| ce.model_id())
    }

    /// Strategy for one request: the override if available, else the effective one.
    pub fn resolve(&self, requested: Option<RerankStrategy>) -> RerankStrategy {
        match requested {
            None => self.effective,
            Some(RerankStrategy::None) => RerankStrategy::None,
            Some(RerankStrategy::CrossEncoder) if ce_ready(self.cross_encoder.as_ref()) => {
                RerankStrategy::CrossEncoder
            }
            Some(RerankStrategy::LlmJudge) if llm_ready(self.llm.as_ref()) => {
                RerankStrategy::LlmJudge
            }
            Some(other) => {
                debug!(component = "rerank", requested = %other, "requested strategy unavailable");
                RerankStrategy::None
            }
        }
    }

    /// Rerank `hits` in place. Never fails: on any error the hits are left as they were.
    pub fn rerank(
        &self,
        query: &str,
        hits: &mut Vec<RetrievalHit>,
        chunks: &[Chunk],
        requested: Option<RerankStrategy>,
    ) -> RerankOutcome {
        let strategy = self.resolve(requested);
        let started = Instant::now();
        let candidates: Vec<(usize, String)> = hits
            .iter()
            .filter_map(|h| chunks.get(h.idx).map(|c| (h.idx, c.text.clone())))
            .collect();

        let timeout = Duration::from_millis(self.config.timeout_ms);
        let ranked = match (strategy, &self.cross_encoder, &self.llm) {
            _ if candidates.is_empty() => Ok(Vec::new()),
            (RerankStrategy::None, _, _) => Ok(Vec::new()),
            (RerankStrategy::CrossEncoder, Some(ce), _) => rerank_cross_encoder(
                ce,
                query,
                &candidates,
                self.config.top_n,
                self.config.keep,
                timeout,
            ),
            (RerankStrategy::LlmJudge, _, Some(llm)) => {
                let pool: Vec<(usize, String)> = candidates
                    .iter()
                    .take(self.config.top_n.max(self.config.keep))
                    .cloned()
                    .collect();
                rerank_llm(
                    llm,
                    &self.config.llm_model,
                    query,
                    &pool,
                    self.config.keep,
                    self.config.llm_max_chars,
                    timeout,
                )
            }
            (RerankStrategy::CrossEncoder, None, _) | (RerankStrategy::LlmJudge, _, None) => {
                Ok(Vec::new())
            }
        };

        let scores = match ranked {
            Ok(ranked) => splice(hits, &ranked),
            Err(e) => {
                warn!(
                    component = "rerank",
                    strategy = %strategy,
                    error = %e,
                    "rerank failed, keeping retrieval order"
                );
                Vec::new()
            }
        };
        RerankOutcome {
            strategy,
            scores,
            latency_ms: started.elapsed().as_millis() as u64,
        }
    }
}

fn ce_ready(ce: Option<&Arc<dyn ICrossEncoder>>) -> bool {
    ce.is_some_and(|ce| ce.is_available())
}

fn llm_ready(llm: Option<&Arc<dyn ILlmJudge>>) -> bool {
    llm.is_some_and(|llm| llm.is_available())
}
