//! Seed matching and bounded breadth-first expansion over the entity graph.

use std::collections::{HashSet, VecDeque};

use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::extraction::is_stopword;
use crate::node::GraphNode;
use crate::store::GraphStore;

/// Documents used as seeds when no entity matches.
const FALLBACK_SEED_DOCS: usize = 2;

/// One node of an explainability path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PathNode {
    Doc { id: String, title: String },
    Section { id: String, doc_id: String },
    Entity { id: String, name: String },
}

/// Nodes walked from a seed to a newly discovered section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPath {
    pub nodes: Vec<PathNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalResult {
    /// Chunk indices of discovered sections, in discovery order.
    pub chunk_indices: Vec<usize>,
    pub paths: Vec<GraphPath>,
    /// Deepest hop expanded.
    pub hops_used: usize,
    pub seed_count: usize,
}

/// Entity keys mentioned by `query`.
///
/// First every entity whose display name occurs in the lowercased query.
/// If none does, entities whose key contains a non-stopword query token,
/// most frequent first, at most `max_fallback` of them.
pub fn match_entities(store: &GraphStore, query: &str, max_fallback: usize) -> Vec<String> {
    let lowered = query.to_lowercase();
    let exact: Vec<String> = store
        .entities()
        .filter(|e| lowered.contains(&e.name.to_lowercase()))
        .map(|e| e.id.clone())
        .collect();
    if !exact.is_empty() {
        return exact;
    }

    let tokens: Vec<&str> = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty() && !is_stopword(t))
        .collect();
    if tokens.is_empty() {
        return Vec::new();
    }
    let mut by_frequency: Vec<_> = store.entities().collect();
    by_frequency.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    by_frequency
        .into_iter()
        .filter(|e| tokens.iter().any(|t| e.id.contains(t)))
        .take(max_fallback)
        .map(|e| e.id.clone())
        .collect()
}

/// Breadth-first expansion from `seeds` (entity keys).
///
/// Falls back to the first two documents when no seed is a known entity.
/// Expansion is bounded to `max(1, max_hops)` hops and stops once
/// `max_sections` sections have been discovered.
pub fn traverse_graph(
    store: &GraphStore,
    seeds: &[String],
    max_hops: usize,
    max_sections: usize,
) -> TraversalResult {
    let mut result = TraversalResult {
        seed_count: seeds.len(),
        ..TraversalResult::default()
    };
    if store.is_empty() {
        return result;
    }
    let max_hops = max_hops.max(1);

    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut queue: VecDeque<(NodeIndex, Vec<NodeIndex>, usize)> = VecDeque::new();
    for seed in seeds {
        if let Some(idx) = store.entity(seed) {
            if visited.insert(idx) {
                queue.push_back((idx, vec![idx], 0));
            }
        }
    }
    if queue.is_empty() {
        for &doc in store.docs().iter().take(FALLBACK_SEED_DOCS) {
            visited.insert(doc);
            queue.push_back((doc, vec![doc], 0));
        }
    }

    'outer: while let Some((node, path, depth)) = queue.pop_front() {
        if result.chunk_indices.len() >= max_sections {
            break;
        }
        result.hops_used = result.hops_used.max(depth);
        for neighbor in store.neighbors(node) {
            if !visited.insert(neighbor) {
                continue;
            }
            let mut next_path = path.clone();
            next_path.push(neighbor);
            if let Some(GraphNode::Section(section)) = store.node(neighbor) {
                result.chunk_indices.push(section.chunk_index);
                result.paths.push(GraphPath {
                    nodes: next_path.iter().filter_map(|&n| describe(store, n)).collect(),
                });
                if result.chunk_indices.len() >= max_sections {
                    break 'outer;
                }
            }
            if depth + 1 < max_hops {
                queue.push_back((neighbor, next_path, depth + 1));
            }
        }
    }
    result
}

fn describe(store: &GraphStore, idx: NodeIndex) -> Option<PathNode> {
    Some(match store.node(idx)? {
        GraphNode::Doc(doc) => PathNode::Doc {
            id: doc.id.clone(),
            title: doc.title.clone().unwrap_or_default(),
        },
        GraphNode::Section(section) => PathNode::Section {
            id: section.display_id(),
            doc_id: section.doc_id.clone(),
        },
        GraphNode::Entity(entity) => PathNode::Entity {
            id: entity.id.clone(),
            name: entity.name.clone(),
        },
    })
}
