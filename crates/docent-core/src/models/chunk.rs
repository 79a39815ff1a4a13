use serde::{Deserialize, Serialize};

/// A contiguous character window of one document.
///
/// Positions in a session's chunk list are index-stable once the index is
/// built; every `RetrievalHit::idx` refers into that list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub doc_id: String,
    /// Start offset in characters.
    pub start: usize,
    /// End offset in characters, exclusive.
    pub end: usize,
    pub text: String,
}

impl Chunk {
    pub fn new(
        doc_id: impl Into<String>,
        start: usize,
        end: usize,
        text: impl Into<String>,
    ) -> Self {
        Self {
            doc_id: doc_id.into(),
            start,
            end,
            text: text.into(),
        }
    }

    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

/// An uploaded document with its extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: String,
    pub name: Option<String>,
    pub text: String,
}
