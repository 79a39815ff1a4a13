//! Arena-backed entity graph. Nodes are addressed by `NodeIndex`; the
//! undirected `StableGraph` keeps adjacency symmetric.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::Undirected;
use tracing::debug;

use docent_core::models::{Chunk, Document};

use crate::extraction::extract_candidate_entities;
use crate::node::{EdgeKind, GraphDoc, GraphEdge, GraphEntity, GraphNode, GraphSection};

/// Read-only once built.
#[derive(Debug, Default)]
pub struct GraphStore {
    graph: StableGraph<GraphNode, EdgeKind, Undirected>,
    docs: HashMap<String, NodeIndex>,
    doc_order: Vec<NodeIndex>,
    /// Indexed by chunk index.
    sections: Vec<NodeIndex>,
    entities: HashMap<String, NodeIndex>,
    entity_order: Vec<NodeIndex>,
    edges: Vec<GraphEdge>,
}

impl GraphStore {
    /// Build from the full chunk list of one index build.
    pub fn build(documents: &[Document], chunks: &[Chunk], entities_per_chunk: usize) -> Self {
        let mut store = Self::default();
        for doc in documents {
            store.ensure_doc(&doc.doc_id, doc.name.clone());
        }

        for (idx, chunk) in chunks.iter().enumerate() {
            let doc = store.ensure_doc(&chunk.doc_id, None);
            let section = store.graph.add_node(GraphNode::Section(GraphSection {
                doc_id: chunk.doc_id.clone(),
                chunk_index: idx,
                text: chunk.text.clone(),
            }));
            store.sections.push(section);
            store.add_edge(doc, section, EdgeKind::Supports);

            for name in extract_candidate_entities(&chunk.text, entities_per_chunk) {
                let entity = store.upsert_entity(name);
                store.add_edge(section, entity, EdgeKind::Mentions);
                store.add_edge(entity, doc, EdgeKind::RefersTo);
            }
        }

        debug!(
            component = "entity_graph",
            docs = store.doc_order.len(),
            sections = store.sections.len(),
            entities = store.entity_order.len(),
            edges = store.edges.len(),
            "graph store built"
        );
        store
    }

    fn ensure_doc(&mut self, doc_id: &str, title: Option<String>) -> NodeIndex {
        if let Some(&idx) = self.docs.get(doc_id) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode::Doc(GraphDoc {
            id: doc_id.to_string(),
            title,
        }));
        self.docs.insert(doc_id.to_string(), idx);
        self.doc_order.push(idx);
        idx
    }

    fn upsert_entity(&mut self, name: String) -> NodeIndex {
        let key = name.to_lowercase();
        if let Some(&idx) = self.entities.get(&key) {
            if let Some(GraphNode::Entity(entity)) = self.graph.node_weight_mut(idx) {
                entity.frequency += 1;
            }
            return idx;
        }
        let idx = self.graph.add_node(GraphNode::Entity(GraphEntity {
            id: key.clone(),
            name,
            frequency: 1,
        }));
        self.entities.insert(key, idx);
        self.entity_order.push(idx);
        idx
    }

    /// Record the edge; the adjacency gets at most one link per node pair.
    fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, kind: EdgeKind) {
        self.edges.push(GraphEdge {
            source,
            target,
            kind,
        });
        if self.graph.find_edge(source, target).is_none() {
            self.graph.add_edge(source, target, kind);
        }
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&GraphNode> {
        self.graph.node_weight(idx)
    }

    /// Neighbors in edge insertion order.
    pub fn neighbors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges(idx)
            .map(|e| (e.id(), if e.source() == idx { e.target() } else { e.source() }))
            .collect();
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, n)| n).collect()
    }

    pub fn doc(&self, doc_id: &str) -> Option<NodeIndex> {
        self.docs.get(doc_id).copied()
    }

    /// Documents in insertion order.
    pub fn docs(&self) -> &[NodeIndex] {
        &self.doc_order
    }

    pub fn section(&self, chunk_index: usize) -> Option<NodeIndex> {
        self.sections.get(chunk_index).copied()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Entity handle by case-insensitive name.
    pub fn entity(&self, name: &str) -> Option<NodeIndex> {
        self.entities.get(&name.to_lowercase()).copied()
    }

    /// Entities in first-seen order.
    pub fn entities(&self) -> impl Iterator<Item = &GraphEntity> {
        self.entity_order
            .iter()
            .filter_map(|&idx| match self.graph.node_weight(idx) {
                Some(GraphNode::Entity(e)) => Some(e),
                _ => None,
            })
    }

    pub fn entity_count(&self) -> usize {
        self.entity_order.len()
    }

    /// Every inserted edge, in insertion order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
