use std::sync::Arc;

use crate::errors::DocentResult;

/// Term-matching scorer over one session's tokenized chunks.
pub trait ILexicalIndex: Send + Sync {
    /// One score per indexed chunk, in chunk order.
    fn score(&self, query_tokens: &[String]) -> Vec<f32>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds a lexical index from a tokenized corpus.
pub trait ILexicalIndexBuilder: Send + Sync {
    fn build(&self, tokenized_corpus: &[Vec<String>]) -> DocentResult<Arc<dyn ILexicalIndex>>;
}
