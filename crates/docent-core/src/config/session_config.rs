use serde::{Deserialize, Serialize};

use super::defaults;

/// Session lifecycle and indexing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub ttl_secs: u64,
    pub max_queries_per_session: u64,
    /// Chunk window in characters.
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub embed_model: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::DEFAULT_SESSION_TTL_SECS,
            max_queries_per_session: defaults::DEFAULT_MAX_QUERIES_PER_SESSION,
            chunk_size: defaults::DEFAULT_CHUNK_SIZE,
            chunk_overlap: defaults::DEFAULT_CHUNK_OVERLAP,
            embed_model: defaults::DEFAULT_EMBED_MODEL.to_string(),
        }
    }
}
