//! # docent-engine
//!
//! Composition root. [`DocentRuntime`] owns the configuration, the session
//! store, the injected providers, the rerank engine and the trace store, and
//! exposes the session, answer and multi-hop operations.

pub mod options;
pub mod runtime;

pub use options::RuntimeOptions;
pub use runtime::{DocentRuntime, IndexSummary};
