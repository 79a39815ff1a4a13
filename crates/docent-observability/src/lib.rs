//! # docent-observability
//!
//! Structured tracing setup and log events, the bounded per-request trace
//! store, and the query metrics log.

pub mod query_log;
pub mod trace_store;
pub mod tracing_setup;

pub use query_log::{QueryKind, QueryLog, QueryLogEntry};
pub use trace_store::TraceStore;
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
