//! # docent-providers
//!
//! Concrete implementations of the external capabilities.
//!
//! - `hashing`: deterministic hashed term-frequency embedder, always available
//! - `cached`: moka-backed query embedding cache keyed by blake3 content hashes
//! - `openai`: OpenAI-compatible chat completions and embeddings over blocking HTTP
//! - `http_cross_encoder`: cross-encoder served behind a `/rerank` endpoint

pub mod cached;
pub mod hashing;
pub mod http;
pub mod http_cross_encoder;
pub mod openai;

pub use cached::CachedEmbedder;
pub use hashing::HashingEmbedder;
pub use http::HttpSettings;
pub use http_cross_encoder::HttpCrossEncoder;
pub use openai::OpenAiClient;
