//! Query metrics log: latency, result counts and the multi-hop totals per
//! request, kept as a bounded ring for performance analysis.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use docent_core::{ConfidenceTier, RerankStrategy, VerificationMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Answer,
    MultiHop,
}

/// A single query log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub request_id: String,
    pub session_id: String,
    pub kind: QueryKind,
    pub latency: Duration,
    pub result_count: usize,
    pub rerank_strategy: RerankStrategy,
    pub top_similarity: Option<f32>,
    pub confidence: Option<ConfidenceTier>,
    pub hops_used: usize,
    pub graph_candidates: usize,
    pub hybrid_candidates: usize,
    pub rerank_latency_ms: u64,
    pub verification_mode: Option<VerificationMode>,
    pub subqueries: usize,
    pub coverage: Option<f32>,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    /// Entry for a single-query answer, timestamped now.
    pub fn answer(
        request_id: impl Into<String>,
        session_id: impl Into<String>,
        latency: Duration,
        result_count: usize,
        rerank_strategy: RerankStrategy,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            session_id: session_id.into(),
            kind: QueryKind::Answer,
            latency,
            result_count,
            rerank_strategy,
            top_similarity: None,
            confidence: None,
            hops_used: 0,
            graph_candidates: 0,
            hybrid_candidates: 0,
            rerank_latency_ms: 0,
            verification_mode: None,
            subqueries: 1,
            coverage: None,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Append-only query log with ring-buffer retention.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: Vec<QueryLogEntry>,
    max_entries: usize,
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryLog {
    pub fn new() -> Self {
        Self::with_capacity(docent_core::config::defaults::DEFAULT_METRICS_LOG_CAPACITY)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            request_id = %entry.request_id,
            kind = ?entry.kind,
            latency_ms = entry.latency.as_millis() as u64,
            result_count = entry.result_count,
            rerank = %entry.rerank_strategy,
            hops_used = entry.hops_used,
            coverage = entry.coverage,
            "query logged"
        );

        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            self.entries.drain(..self.entries.len() - self.max_entries);
        }
    }

    pub fn entries(&self) -> &[QueryLogEntry] {
        &self.entries
    }

    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at the given percentile (0.0 to 1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let idx = ((p.clamp(0.0, 1.0) * (latencies.len() - 1) as f64).round() as usize)
            .min(latencies.len() - 1);
        latencies[idx]
    }

    /// Mean coverage over multi-hop entries that were verified.
    pub fn mean_coverage(&self) -> Option<f32> {
        let values: Vec<f32> = self.entries.iter().filter_map(|e| e.coverage).collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f32>() / values.len() as f32)
    }

    pub fn count_kind(&self, kind: QueryKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}
