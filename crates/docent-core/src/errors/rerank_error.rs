/// Rerank subsystem errors.
///
/// Request-time failures never leave the rerank engine; only an
/// initialization failure under the strict flag reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum RerankError {
    #[error("cross-encoder {model} failed to initialize: {reason}")]
    InitFailed { model: String, reason: String },

    #[error("rerank inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("score count mismatch: expected {expected}, got {actual}")]
    ScoreCountMismatch { expected: usize, actual: usize },

    #[error("llm judge reply contained no usable ids")]
    UnparseableReply,
}
