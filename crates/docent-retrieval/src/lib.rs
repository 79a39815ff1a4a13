//! # docent-retrieval
//!
//! Dense search, lexical search, Reciprocal Rank Fusion, MMR selection and
//! the hybrid retriever that ties them together. Also ships exact reference
//! implementations of the vector and lexical index capabilities.

pub mod index;
pub mod search;
pub mod tokenize;

pub use index::{Bm25Index, Bm25IndexBuilder, FlatVectorIndex, FlatVectorIndexBuilder};
pub use search::{
    Attempt, FallbackPolicy, HybridRetriever, RetrievalCorpus, RetrievalMetadata,
    RetrievalOutcome, RetrievalParams,
};
pub use tokenize::tokenize;
