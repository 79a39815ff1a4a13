//! # docent-core
//!
//! Foundation crate for the Docent retrieval core.
//! Defines the data model, capability traits, errors, config, and the
//! deadline helper used around every external call.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod deadline;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::DocentConfig;
pub use errors::{DocentError, DocentResult};
pub use models::{
    AnswerMode, AnswerSource, Chunk, ConfidenceTier, Document, RerankStrategy, RetrievalHit,
    RetrievalStrategy, SimilarityMetric, Verdict, VerificationMode, VerificationSummary,
};
