use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDoc {
    pub id: String,
    pub title: Option<String>,
}

/// One chunk of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSection {
    pub doc_id: String,
    pub chunk_index: usize,
    pub text: String,
}

impl GraphSection {
    /// Display id, `<doc_id>:<chunk_index>`.
    pub fn display_id(&self) -> String {
        format!("{}:{}", self.doc_id, self.chunk_index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEntity {
    /// Canonical lowercase key.
    pub id: String,
    /// Name as first extracted.
    pub name: String,
    /// Sections mentioning this entity.
    pub frequency: u32,
}

/// Node weight of the entity graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GraphNode {
    Doc(GraphDoc),
    Section(GraphSection),
    Entity(GraphEntity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    /// doc → section
    Supports,
    /// section → entity
    Mentions,
    /// entity → doc
    RefersTo,
}

/// An inserted edge, in insertion order. Direction is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub kind: EdgeKind,
}
