use serde::{Deserialize, Serialize};

use super::defaults;

/// Entity graph and multi-hop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub max_graph_hops: usize,
    pub max_subqueries: usize,
    /// Per sub-query k when the request does not set one.
    pub default_k: usize,
    pub default_temperature: f32,
    /// Entity names extracted per chunk at build time.
    pub entities_per_chunk: usize,
    /// Sections a single traversal may discover.
    pub max_sections: usize,
    /// Cap on token-overlap seed matches.
    pub max_seed_matches: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_graph_hops: defaults::DEFAULT_MAX_GRAPH_HOPS,
            max_subqueries: defaults::DEFAULT_MAX_SUBQUERIES,
            default_k: defaults::DEFAULT_GRAPH_K,
            default_temperature: defaults::DEFAULT_GRAPH_TEMPERATURE,
            entities_per_chunk: defaults::DEFAULT_ENTITIES_PER_CHUNK,
            max_sections: defaults::DEFAULT_MAX_SECTIONS,
            max_seed_matches: defaults::DEFAULT_MAX_SEED_MATCHES,
        }
    }
}
