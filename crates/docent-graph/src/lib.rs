//! # docent-graph
//!
//! Co-occurrence graph over documents, their chunked sections and the
//! entities those sections mention. Built once per index build, read-only
//! afterwards, and shared across concurrent traversals behind an `Arc`.

pub mod extraction;
pub mod node;
pub mod store;
pub mod traversal;

pub use extraction::{extract_candidate_entities, STOPWORDS};
pub use node::{EdgeKind, GraphDoc, GraphEdge, GraphEntity, GraphNode, GraphSection};
pub use store::GraphStore;
pub use traversal::{match_entities, traverse_graph, GraphPath, PathNode, TraversalResult};
