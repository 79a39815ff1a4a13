// Single source of truth for all default values.

// --- Retrieval ---
pub const DEFAULT_DENSE_K: usize = 40;
pub const DEFAULT_LEXICAL_K: usize = 40;
pub const DEFAULT_FUSION_RRF_K: u32 = 60;
pub const DEFAULT_ANSWER_TOP_K: usize = 6;
pub const DEFAULT_MAX_RETRIEVED: usize = 12;
pub const DEFAULT_USE_MMR: bool = true;
pub const DEFAULT_MMR_LAMBDA: f32 = 0.7;
pub const DEFAULT_SIMILARITY_FLOOR: f32 = 0.18;
pub const DEFAULT_FALLBACK_WIDEN_K: usize = 20;

// --- Rerank ---
pub const DEFAULT_RERANK_STRICT: bool = false;
pub const DEFAULT_RERANK_TOP_N: usize = 12;
pub const DEFAULT_RERANK_KEEP: usize = 6;
pub const DEFAULT_RERANK_LLM_MAX_CHARS: usize = 1_200;
pub const DEFAULT_RERANK_LLM_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_RERANK_TIMEOUT_MS: u64 = 20_000;

// --- Graph / multi-hop ---
pub const DEFAULT_MAX_GRAPH_HOPS: usize = 2;
pub const DEFAULT_MAX_SUBQUERIES: usize = 3;
pub const DEFAULT_GRAPH_K: usize = 6;
pub const DEFAULT_GRAPH_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_ENTITIES_PER_CHUNK: usize = 5;
pub const DEFAULT_MAX_SECTIONS: usize = 20;
pub const DEFAULT_MAX_SEED_MATCHES: usize = 5;
pub const MAX_SUMMARY_TEMPERATURE: f32 = 0.6;

// --- Feature flags ---
pub const DEFAULT_GRAPH_ENABLED: bool = false;
pub const DEFAULT_LLM_RERANK_ENABLED: bool = false;
pub const DEFAULT_FACT_CHECK_LLM_ENABLED: bool = false;
pub const DEFAULT_FACT_CHECK_STRICT: bool = false;
pub const DEFAULT_ADVANCED_LLM_ENABLED: bool = false;
pub const DEFAULT_ANSWER_CONFIDENCE_ENABLED: bool = true;

// --- Answer ---
pub const DEFAULT_ANSWER_TONE: &str = "professional";
pub const DEFAULT_ANSWER_MARKDOWN: bool = true;
pub const DEFAULT_ANSWER_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SUMMARY_MAX_TOKENS: u32 = 220;
pub const DEFAULT_SYNTHESIS_MAX_TOKENS: u32 = 500;
pub const DEFAULT_LLM_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_ANSWER_TEMPERATURE: f32 = 0.2;

// --- Session ---
pub const DEFAULT_SESSION_TTL_SECS: u64 = 1_800; // 30 minutes
pub const DEFAULT_MAX_QUERIES_PER_SESSION: u64 = 20;
pub const DEFAULT_CHUNK_SIZE: usize = 800;
pub const DEFAULT_CHUNK_OVERLAP: usize = 120;
pub const DEFAULT_EMBED_MODEL: &str = "text-embedding-3-large";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
pub const DEFAULT_TRACE_CACHE_SIZE: usize = 200;
pub const MIN_TRACE_CACHE_SIZE: usize = 20;
pub const DEFAULT_METRICS_LOG_CAPACITY: usize = 10_000;
