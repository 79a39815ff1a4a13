//! # docent-answer
//!
//! Turns a ranked hit list into what the answer LLM sees: numbered sources
//! with stable citation ids, a confidence tier, the chat messages, and a
//! cancellable token stream with a deterministic fallback.

pub mod compose;
pub mod confidence;
pub mod context;
pub mod sources;
pub mod stream;

pub use compose::{build_messages, postprocess_chunk, INSUFFICIENT_REPLY};
pub use confidence::compute_confidence;
pub use context::{AnswerContext, AnswerContextAssembler, RetrievedChunk};
pub use sources::{citation_mapping, prepare_sources, PreparedSources};
pub use stream::{
    fallback_message, first_sentence, stream_answer, CancellationToken, StreamOutcome,
};
