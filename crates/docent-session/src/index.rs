//! Index building: chunk → embed → vector index → lexical index → graph.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use docent_core::errors::{DocentResult, EmbeddingError};
use docent_core::models::{Chunk, Document};
use docent_core::traits::{
    IEmbeddingProvider, ILexicalIndex, ILexicalIndexBuilder, IVectorIndex, IVectorIndexBuilder,
};
use docent_core::{DocentError, SimilarityMetric};
use docent_graph::GraphStore;
use docent_retrieval::index::l2_normalize;
use docent_retrieval::{tokenize, RetrievalCorpus};

use crate::chunking::chunk_text;

/// Everything a query needs from one session. Immutable once built.
pub struct SessionIndex {
    pub chunks: Vec<Chunk>,
    /// Row-aligned with `chunks`; unit length under the cosine metric.
    pub embeddings: Vec<Vec<f32>>,
    pub vector: Arc<dyn IVectorIndex>,
    pub lexical: Option<Arc<dyn ILexicalIndex>>,
    pub graph: Option<Arc<GraphStore>>,
    pub embed_model: String,
    pub metric: SimilarityMetric,
    pub built_at: DateTime<Utc>,
}

impl SessionIndex {
    /// Borrowed view for the hybrid retriever.
    pub fn corpus(&self) -> RetrievalCorpus<'_> {
        RetrievalCorpus {
            vector: self.vector.as_ref(),
            lexical: self.lexical.as_deref(),
            embeddings: Some(&self.embeddings),
            chunk_count: self.chunks.len(),
        }
    }

    pub fn chunk(&self, idx: usize) -> Option<&Chunk> {
        self.chunks.get(idx)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct IndexOptions {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub embed_model: String,
    pub metric: SimilarityMetric,
    pub build_graph: bool,
    pub entities_per_chunk: usize,
}

/// Builds a `SessionIndex` from injected capabilities.
pub struct IndexBuilder {
    embedder: Arc<dyn IEmbeddingProvider>,
    vector_builder: Arc<dyn IVectorIndexBuilder>,
    lexical_builder: Arc<dyn ILexicalIndexBuilder>,
}

impl IndexBuilder {
    pub fn new(
        embedder: Arc<dyn IEmbeddingProvider>,
        vector_builder: Arc<dyn IVectorIndexBuilder>,
        lexical_builder: Arc<dyn ILexicalIndexBuilder>,
    ) -> Self {
        Self {
            embedder,
            vector_builder,
            lexical_builder,
        }
    }

    pub fn build(
        &self,
        documents: &[Document],
        options: &IndexOptions,
    ) -> DocentResult<SessionIndex> {
        let chunks: Vec<Chunk> = documents
            .iter()
            .flat_map(|doc| {
                chunk_text(&doc.text, options.chunk_size, options.chunk_overlap)
                    .into_iter()
                    .map(move |(start, end, text)| Chunk::new(doc.doc_id.clone(), start, end, text))
            })
            .collect();
        if chunks.is_empty() {
            return Err(DocentError::invalid_input("no document text to index"));
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let mut embeddings = self.embedder.embed_batch(&texts, &options.embed_model)?;
        if embeddings.len() != chunks.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: chunks.len(),
                actual: embeddings.len(),
            }
            .into());
        }
        if options.metric == SimilarityMetric::Cosine {
            for e in &mut embeddings {
                l2_normalize(e);
            }
        }

        let vector = self.vector_builder.build(&embeddings, options.metric)?;
        let tokenized: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();
        let lexical = self.lexical_builder.build(&tokenized)?;
        let graph = options
            .build_graph
            .then(|| Arc::new(GraphStore::build(documents, &chunks, options.entities_per_chunk)));

        info!(
            component = "index_builder",
            documents = documents.len(),
            chunks = chunks.len(),
            dimensions = vector.dimensions(),
            graph = graph.is_some(),
            provider = self.embedder.name(),
            "session index built"
        );

        Ok(SessionIndex {
            chunks,
            embeddings,
            vector,
            lexical: Some(lexical),
            graph,
            embed_model: options.embed_model.clone(),
            metric: options.metric,
            built_at: Utc::now(),
        })
    }
}
