//! Test fixtures for Docent: deterministic fakes for every external
//! capability plus JSON corpus fixtures under `data/`.

pub mod corpus;
pub mod cross_encoders;
pub mod embedders;
pub mod llm;

use std::path::PathBuf;

use serde::de::DeserializeOwned;

pub use corpus::{chunks_from_texts, documents_from_fixture, CorpusFixture};
pub use cross_encoders::{FailingCrossEncoder, StaticCrossEncoder, UnavailableCrossEncoder};
pub use embedders::{FailingEmbedder, KeywordEmbedder};
pub use llm::{FailingLlm, ScriptedLlm, SlowLlm};

/// Root directory of the fixture data.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}
