use serde::{Deserialize, Serialize};

use super::defaults;

/// Observability subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub json_logs: bool,
    pub trace_cache_size: usize,
    /// Entries kept in the in-memory query metrics log.
    pub metrics_log_capacity: usize,
}

impl ObservabilityConfig {
    /// Trace cache capacity with the lower bound applied.
    pub fn effective_trace_cache_size(&self) -> usize {
        self.trace_cache_size.max(defaults::MIN_TRACE_CACHE_SIZE)
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            json_logs: defaults::DEFAULT_JSON_LOGS,
            trace_cache_size: defaults::DEFAULT_TRACE_CACHE_SIZE,
            metrics_log_capacity: defaults::DEFAULT_METRICS_LOG_CAPACITY,
        }
    }
}
