/// Errors from the external summarization and synthesis calls.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("llm call failed: {reason}")]
    CallFailed { reason: String },

    #[error("llm returned an empty completion")]
    EmptyCompletion,

    #[error("llm judge not configured")]
    NotConfigured,
}
