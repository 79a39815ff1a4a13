use serde::Deserialize;

use docent_core::models::{Chunk, Document};

/// A named corpus stored under `data/corpus/`.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusFixture {
    pub name: String,
    pub documents: Vec<FixtureDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureDocument {
    pub doc_id: String,
    pub title: Option<String>,
    pub text: String,
}

/// One chunk per text, doc ids `doc-0`, `doc-1`, ...
pub fn chunks_from_texts(texts: &[&str]) -> Vec<Chunk> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| Chunk::new(format!("doc-{i}"), 0, t.chars().count(), *t))
        .collect()
}

/// Load `data/corpus/<name>.json` as documents.
pub fn documents_from_fixture(name: &str) -> Vec<Document> {
    let fixture: CorpusFixture = crate::load_fixture(&format!("corpus/{name}.json"));
    fixture
        .documents
        .into_iter()
        .map(|d| Document {
            doc_id: d.doc_id,
            name: d.title,
            text: d.text,
        })
        .collect()
}
