//! Structured log events for session and query lifecycle.

pub fn session_created(session_id: &str) {
    tracing::info!(event = "session_created", session_id = %session_id, "session created");
}

pub fn index_built(session_id: &str, chunks: usize, graph: bool, latency_ms: u64) {
    tracing::info!(
        event = "index_built",
        session_id = %session_id,
        chunks = chunks,
        graph = graph,
        latency_ms = latency_ms,
        "index built"
    );
}

pub fn sessions_expired(removed: usize) {
    tracing::info!(event = "sessions_expired", removed = removed, "expired sessions removed");
}

/// Log a degradation: the component, what failed and what was used instead.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

pub fn request_rejected(session_id: &str, reason: &str) {
    tracing::info!(
        event = "request_rejected",
        session_id = %session_id,
        reason = %reason,
        "request rejected"
    );
}
