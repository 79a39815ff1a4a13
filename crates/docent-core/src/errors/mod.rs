//! Error handling for Docent.
//! One error enum per subsystem, `thiserror` only.

pub mod docent_error;
pub mod embedding_error;
pub mod index_error;
pub mod rerank_error;
pub mod synthesis_error;

pub use docent_error::{DocentError, DocentResult, ErrorKind};
pub use embedding_error::EmbeddingError;
pub use index_error::IndexError;
pub use rerank_error::RerankError;
pub use synthesis_error::SynthesisError;
