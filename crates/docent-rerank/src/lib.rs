//! # docent-rerank
//!
//! Secondary ranking over retrieved hits. The configured strategy is
//! resolved once at startup; request-time failures leave hits unranked.

pub mod cross_encoder;
pub mod engine;
pub mod llm_judge;
pub mod splice;

pub use engine::{RerankEngine, RerankOutcome};
pub use llm_judge::{build_rerank_prompt, parse_ranked_ids};
