pub mod cross_encoder;
pub mod embedding;
pub mod lexical_index;
pub mod llm;
pub mod vector_index;

pub use cross_encoder::ICrossEncoder;
pub use embedding::IEmbeddingProvider;
pub use lexical_index::{ILexicalIndex, ILexicalIndexBuilder};
pub use llm::{CompletionRequest, ILlmJudge, TokenStream};
pub use vector_index::{IVectorIndex, IVectorIndexBuilder};
