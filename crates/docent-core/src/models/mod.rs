pub mod answer;
pub mod chat;
pub mod chunk;
pub mod hit;
pub mod strategy;
pub mod trace;
pub mod verification;

pub use answer::{AnswerMode, AnswerSource, CitationEntry, ConfidenceTier, SourceMeta};
pub use chat::{ChatMessage, ChatRole};
pub use chunk::{Chunk, Document};
pub use hit::RetrievalHit;
pub use strategy::{RerankStrategy, RetrievalStrategy, SimilarityMetric};
pub use trace::{PlannerStep, QueryTrace, TraceHit, TraceVerdict, TraceVerification};
pub use verification::{Verdict, VerificationMode, VerificationSummary};
