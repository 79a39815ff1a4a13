use super::{EmbeddingError, IndexError, RerankError, SynthesisError};

/// Result alias used across the workspace.
pub type DocentResult<T> = Result<T, DocentError>;

/// Top-level error for every Docent operation.
#[derive(Debug, thiserror::Error)]
pub enum DocentError {
    #[error("capability disabled: {capability}")]
    CapabilityDisabled { capability: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("session not found: {session_id}")]
    SessionNotFound { session_id: String },

    #[error("no index built for session {session_id}")]
    IndexNotBuilt { session_id: String },

    #[error("query limit reached for session {session_id}: {limit}")]
    QueryLimitReached { session_id: String, limit: u64 },

    #[error("retrieval unavailable: {reason}")]
    RetrievalUnavailable { reason: String },

    #[error("{operation} timed out after {after_ms} ms")]
    Timeout { operation: String, after_ms: u64 },

    #[error("rerank error: {0}")]
    RerankError(#[from] RerankError),

    #[error("synthesis error: {0}")]
    SynthesisError(#[from] SynthesisError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("index error: {0}")]
    IndexError(#[from] IndexError),

    #[error("worker failed: {0}")]
    WorkerFailed(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Coarse classification used by callers that map errors onto a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A requested capability is turned off in this environment.
    Configuration,
    /// The request itself is unusable (empty query, unknown session, no index).
    Input,
    /// The vector index for the session cannot serve the request.
    RetrievalUnavailable,
    /// An external service failed and no fallback applied.
    Dependency,
    Internal,
}

impl DocentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CapabilityDisabled { .. } | Self::ConfigError(_) => ErrorKind::Configuration,
            Self::InvalidInput { .. }
            | Self::SessionNotFound { .. }
            | Self::IndexNotBuilt { .. }
            | Self::QueryLimitReached { .. } => ErrorKind::Input,
            Self::RetrievalUnavailable { .. } => ErrorKind::RetrievalUnavailable,
            Self::Timeout { .. }
            | Self::RerankError(_)
            | Self::SynthesisError(_)
            | Self::EmbeddingError(_) => ErrorKind::Dependency,
            Self::IndexError(_) | Self::WorkerFailed(_) | Self::SerializationError(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Whether the caller should see this as a client error.
    pub fn is_client_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Configuration | ErrorKind::Input)
    }

    pub fn disabled(capability: impl Into<String>) -> Self {
        Self::CapabilityDisabled {
            capability: capability.into(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
