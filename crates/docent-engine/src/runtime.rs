//! DocentRuntime: owns every component and serves the request operations.
//!
//! Requests are validated in a fixed order before any retrieval work:
//! capability flags, query text, session, index, then the per-session
//! query cap. Rejections are logged as `request_rejected` events.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use docent_answer::{
    build_messages, fallback_message, AnswerContext, AnswerContextAssembler, CancellationToken,
    StreamOutcome,
};
use docent_core::errors::{DocentError, DocentResult};
use docent_core::models::{ChatMessage, QueryTrace};
use docent_core::traits::{CompletionRequest, IEmbeddingProvider, ILlmJudge};
use docent_core::{AnswerMode, DocentConfig, RerankStrategy};
use docent_multihop::{LlmSettings, MultiHopOrchestrator, MultiHopRequest, MultiHopResponse};
use docent_observability::tracing_setup::events;
use docent_observability::{QueryKind, QueryLog, QueryLogEntry, TraceStore};
use docent_providers::{CachedEmbedder, HashingEmbedder};
use docent_rerank::RerankEngine;
use docent_retrieval::{Bm25IndexBuilder, FlatVectorIndexBuilder};
use docent_session::{IndexBuilder, IndexOptions, SessionIndex, SessionStore};

use crate::options::RuntimeOptions;

/// Result of a successful `build_index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexSummary {
    pub session_id: String,
    pub documents: usize,
    pub chunks: usize,
    pub graph: bool,
    pub embed_model: String,
    pub latency_ms: u64,
}

pub struct DocentRuntime {
    config: DocentConfig,
    sessions: SessionStore,
    traces: TraceStore,
    query_log: Mutex<QueryLog>,
    embedder: Arc<dyn IEmbeddingProvider>,
    index_builder: IndexBuilder,
    reranker: Arc<RerankEngine>,
    assembler: AnswerContextAssembler,
    orchestrator: MultiHopOrchestrator,
    llm: Option<Arc<dyn ILlmJudge>>,
}

impl DocentRuntime {
    /// Wire the components together.
    ///
    /// Fails only on invalid configuration or, with `rerank.strict`, when the
    /// configured cross-encoder is unavailable.
    pub fn new(options: RuntimeOptions) -> DocentResult<Self> {
        let RuntimeOptions {
            config,
            embedder,
            cross_encoder,
            llm,
            embedding_cache_entries,
        } = options;
        config.validate()?;

        let base: Arc<dyn IEmbeddingProvider> =
            embedder.unwrap_or_else(|| Arc::new(HashingEmbedder::default()));
        let embedder: Arc<dyn IEmbeddingProvider> = if embedding_cache_entries > 0 {
            Arc::new(CachedEmbedder::new(base, embedding_cache_entries))
        } else {
            base
        };

        let reranker = Arc::new(RerankEngine::initialize(
            config.rerank.clone(),
            cross_encoder,
            llm.clone(),
        )?);
        if reranker.effective_strategy() != reranker.configured_strategy() {
            events::degradation_triggered(
                "rerank",
                &format!("{} unavailable", reranker.configured_strategy()),
                reranker.effective_strategy().as_str(),
            );
        }

        let index_builder = IndexBuilder::new(
            Arc::clone(&embedder),
            Arc::new(FlatVectorIndexBuilder),
            Arc::new(Bm25IndexBuilder),
        );
        let assembler = AnswerContextAssembler::new(
            config.retrieval.clone(),
            config.features.answer_confidence_enabled,
        );
        let llm_settings = config
            .features
            .advanced_llm_enabled
            .then(|| llm.clone())
            .flatten()
            .map(|l| LlmSettings::from_config(l, &config.answer));
        let orchestrator = MultiHopOrchestrator::new(
            config.retrieval.clone(),
            config.graph.clone(),
            Arc::clone(&reranker),
            Arc::clone(&embedder),
            llm_settings,
        );

        let traces = TraceStore::new(config.observability.effective_trace_cache_size());
        let query_log = Mutex::new(QueryLog::with_capacity(
            config.observability.metrics_log_capacity,
        ));

        info!(
            component = "runtime",
            embedder = embedder.name(),
            rerank = %reranker.effective_strategy(),
            graph = config.features.graph_enabled,
            advanced_llm = orchestrator.llm_enabled(),
            trace_capacity = traces.capacity(),
            "docent runtime initialized"
        );

        Ok(Self {
            config,
            sessions: SessionStore::new(),
            traces,
            query_log,
            embedder,
            index_builder,
            reranker,
            assembler,
            orchestrator,
            llm,
        })
    }

    pub fn config(&self) -> &DocentConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn effective_rerank_strategy(&self) -> RerankStrategy {
        self.reranker.effective_strategy()
    }

    // --- Sessions ---

    pub fn create_session(&self) -> String {
        let session_id = self.sessions.create_session();
        events::session_created(&session_id);
        session_id
    }

    pub fn add_document(
        &self,
        session_id: &str,
        doc_id: &str,
        name: Option<String>,
        text: impl Into<String>,
    ) -> DocentResult<()> {
        if doc_id.trim().is_empty() {
            return Err(DocentError::invalid_input("document id is required"));
        }
        self.sessions.add_document(session_id, doc_id, name, text.into())
    }

    /// Chunk, embed and index the session's documents, then swap the new
    /// index in. Requests already holding the old index finish on it.
    pub fn build_index(&self, session_id: &str) -> DocentResult<IndexSummary> {
        let started = Instant::now();
        let documents = self.sessions.documents(session_id)?;
        let options = IndexOptions {
            chunk_size: self.config.session.chunk_size,
            chunk_overlap: self.config.session.chunk_overlap,
            embed_model: self.config.session.embed_model.clone(),
            metric: self.config.retrieval.metric,
            build_graph: self.config.features.graph_enabled,
            entities_per_chunk: self.config.graph.entities_per_chunk,
        };
        let index = self.index_builder.build(&documents, &options)?;
        let installed = self.sessions.install_index(session_id, index)?;

        let latency_ms = started.elapsed().as_millis() as u64;
        events::index_built(session_id, installed.len(), installed.graph.is_some(), latency_ms);
        Ok(IndexSummary {
            session_id: session_id.to_string(),
            documents: documents.len(),
            chunks: installed.len(),
            graph: installed.graph.is_some(),
            embed_model: installed.embed_model.clone(),
            latency_ms,
        })
    }

    /// Drop sessions older than the configured TTL, with their indexes and traces.
    pub fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_at(chrono::Utc::now())
    }

    pub fn cleanup_expired_at(&self, now: chrono::DateTime<chrono::Utc>) -> usize {
        let ttl = chrono::Duration::seconds(self.config.session.ttl_secs as i64);
        let removed = self.sessions.expire_at(ttl, now);
        for session_id in &removed {
            self.traces.remove_session(session_id);
        }
        if !removed.is_empty() {
            events::sessions_expired(removed.len());
        }
        removed.len()
    }

    // --- Single-query answers ---

    /// Retrieve, rerank and assemble everything the answer LLM needs.
    ///
    /// `k` defaults to the configured answer size and `mode` to the
    /// configured answer mode.
    pub fn prepare_answer_context(
        &self,
        session_id: &str,
        query: &str,
        k: Option<usize>,
        mode: Option<AnswerMode>,
    ) -> DocentResult<AnswerContext> {
        let started = Instant::now();
        let index = self
            .admit(session_id, query)
            .inspect_err(|e| events::request_rejected(session_id, &e.to_string()))?;

        let k = k.unwrap_or(self.config.retrieval.answer_top_k);
        let mode = mode.unwrap_or(self.config.answer.mode);
        let context = self.assembler.prepare(
            &index,
            self.embedder.as_ref(),
            &self.reranker,
            query,
            k,
            mode,
        )?;

        let request_id = uuid::Uuid::new_v4().simple().to_string();
        self.record(QueryLogEntry {
            top_similarity: context.top_similarity,
            confidence: context.confidence,
            ..QueryLogEntry::answer(
                request_id,
                session_id,
                started.elapsed(),
                context.sources.len(),
                context.rerank_strategy,
            )
        });
        Ok(context)
    }

    /// Chat messages for the external answer LLM.
    pub fn answer_messages(&self, context: &AnswerContext) -> Vec<ChatMessage> {
        build_messages(&context.query, &context.sources, context.mode, &self.config.answer)
    }

    /// Stream the answer for a prepared context into `sink`.
    ///
    /// Without a chat model the extractive fallback is returned as a failed
    /// outcome; the caller still has something to show.
    pub fn stream_answer(
        &self,
        context: &AnswerContext,
        cancel: &CancellationToken,
        sink: impl FnMut(&str),
    ) -> StreamOutcome {
        let Some(llm) = self.llm.as_ref().filter(|l| l.is_available()) else {
            events::degradation_triggered(
                "answer_stream",
                "no chat model available",
                "extractive answer",
            );
            return StreamOutcome::Failed {
                fallback: fallback_message(context),
            };
        };
        let request = CompletionRequest {
            messages: self.answer_messages(context),
            model: self.config.answer.model.clone(),
            temperature: self.config.answer.temperature,
            max_tokens: self.config.answer.synthesis_max_tokens,
        };
        docent_answer::stream_answer(llm.as_ref(), &request, context, cancel, sink)
    }

    // --- Multi-hop ---

    /// Run a multi-hop request and record its trace.
    pub fn advanced_query(
        &self,
        session_id: &str,
        request: &MultiHopRequest,
    ) -> DocentResult<MultiHopResponse> {
        let started = Instant::now();
        let (plan, index) = request
            .resolve(&self.config)
            .and_then(|plan| Ok((plan, self.admit(session_id, &request.query)?)))
            .inspect_err(|e| events::request_rejected(session_id, &e.to_string()))?;
        if index.graph.is_none() {
            warn!(
                component = "runtime",
                session_id,
                "index has no entity graph; rebuild it to enable graph candidates"
            );
        }

        let response = self.orchestrator.run(session_id, &index, &plan)?;
        self.traces.put(response.trace.clone());

        let metrics = &response.metrics;
        self.record(QueryLogEntry {
            kind: QueryKind::MultiHop,
            hops_used: metrics.hops_used,
            graph_candidates: metrics.graph_candidates,
            hybrid_candidates: metrics.hybrid_candidates,
            rerank_latency_ms: metrics.rerank_latency_ms,
            verification_mode: Some(metrics.verification_mode),
            subqueries: metrics.subqueries,
            coverage: metrics.coverage,
            ..QueryLogEntry::answer(
                response.trace.request_id.clone(),
                session_id,
                started.elapsed(),
                response.citations.len(),
                metrics.rerank_strategy,
            )
        });
        Ok(response)
    }

    // --- Traces and metrics ---

    pub fn trace(&self, session_id: &str, request_id: &str) -> Option<QueryTrace> {
        self.traces.get(session_id, request_id)
    }

    pub fn traces_for_session(&self, session_id: &str) -> Vec<QueryTrace> {
        self.traces.for_session(session_id)
    }

    /// Snapshot of the query metrics log.
    pub fn query_log(&self) -> QueryLog {
        self.log().clone()
    }

    /// Query text, session and index checks, then one unit of the session's
    /// query allowance.
    fn admit(&self, session_id: &str, query: &str) -> DocentResult<Arc<SessionIndex>> {
        if query.trim().is_empty() {
            return Err(DocentError::invalid_input("query text is required"));
        }
        let index = self.sessions.index(session_id)?;
        self.sessions
            .record_query(session_id, self.config.session.max_queries_per_session)?;
        Ok(index)
    }

    fn record(&self, entry: QueryLogEntry) {
        self.log().record(entry);
    }

    fn log(&self) -> MutexGuard<'_, QueryLog> {
        self.query_log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
