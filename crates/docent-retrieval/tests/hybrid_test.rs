use std::sync::atomic::{AtomicUsize, Ordering};

use docent_core::errors::DocentResult;
use docent_core::traits::{ILexicalIndex, IVectorIndex};
use docent_core::{RetrievalStrategy, SimilarityMetric};
use docent_retrieval::{
    tokenize, Attempt, Bm25Index, FallbackPolicy, FlatVectorIndex, HybridRetriever,
    RetrievalCorpus, RetrievalParams,
};
use test_fixtures::KeywordEmbedder;

fn params(answer_top_k: usize) -> RetrievalParams {
    RetrievalParams {
        strategy: RetrievalStrategy::Hybrid,
        dense_k: 40,
        lexical_k: 40,
        fusion_rrf_k: 60,
        answer_top_k,
        use_mmr: true,
        mmr_lambda: 0.7,
    }
}

struct Fixture {
    vector: FlatVectorIndex,
    lexical: Bm25Index,
    embeddings: Vec<Vec<f32>>,
    embedder: KeywordEmbedder,
}

fn abc() -> Fixture {
    let embedder = KeywordEmbedder::new(&["a", "b", "c"]);
    let texts = ["A", "B", "C"];
    let mut embeddings: Vec<Vec<f32>> = texts.iter().map(|t| embedder.vector(t)).collect();
    for e in &mut embeddings {
        docent_retrieval::index::l2_normalize(e);
    }
    let tokens: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();
    Fixture {
        vector: FlatVectorIndex::new(&embeddings, SimilarityMetric::Cosine).unwrap(),
        lexical: Bm25Index::new(&tokens),
        embeddings,
        embedder,
    }
}

impl Fixture {
    fn corpus(&self) -> RetrievalCorpus<'_> {
        RetrievalCorpus {
            vector: &self.vector,
            lexical: Some(&self.lexical),
            embeddings: Some(&self.embeddings),
            chunk_count: self.embeddings.len(),
        }
    }
}

// ── End-to-end fusion scenario ──

#[test]
fn query_matching_chunk_a_returns_it_alone() {
    let f = abc();
    let retriever = HybridRetriever::new(params(1));
    let (hits, meta) = retriever
        .retrieve(&f.corpus(), "A", &f.embedder.vector("A"))
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].idx, 0);
    assert_eq!(meta.fused_order[0], 0);
    assert_eq!(meta.lexical_order, vec![0]);
    assert!((hits[0].fused_score - 2.0 / 61.0).abs() < 1e-6);
    assert!(hits[0].lexical_score > 0.0);
}

#[test]
fn dense_strategy_skips_lexical() {
    let f = abc();
    let mut p = params(3);
    p.strategy = RetrievalStrategy::Dense;
    let (hits, meta) = HybridRetriever::new(p)
        .retrieve(&f.corpus(), "A", &f.embedder.vector("A"))
        .unwrap();
    assert!(meta.lexical_order.is_empty());
    assert_eq!(hits[0].idx, 0);
    assert!(hits.iter().all(|h| h.lexical_score == 0.0));
}

#[test]
fn zero_dense_k_falls_back_to_answer_top_k() {
    let f = abc();
    let mut p = params(2);
    p.dense_k = 0;
    let (_, meta) = HybridRetriever::new(p)
        .retrieve(&f.corpus(), "A", &f.embedder.vector("A"))
        .unwrap();
    assert_eq!(meta.params.dense_k, 2);
    assert_eq!(meta.dense_order.len(), 2);
}

#[test]
fn mmr_disabled_takes_fused_prefix() {
    let f = abc();
    let mut p = params(2);
    p.use_mmr = false;
    let (hits, meta) = HybridRetriever::new(p)
        .retrieve(&f.corpus(), "A", &f.embedder.vector("A"))
        .unwrap();
    let idxs: Vec<usize> = hits.iter().map(|h| h.idx).collect();
    assert_eq!(idxs, meta.fused_order[..2].to_vec());
}

// ── Fallback widen ──

#[test]
fn weak_primary_widens_exactly_once() {
    let f = abc();
    let retriever = HybridRetriever::new(params(2));
    let policy = FallbackPolicy {
        similarity_floor: 0.18,
        widen_by: 20,
        metric: SimilarityMetric::Cosine,
    };
    let out = retriever
        .retrieve_with_fallback(&f.corpus(), "zzz", &f.embedder.vector("zzz"), &policy)
        .unwrap();
    assert_eq!(out.attempt, Attempt::Fallback);
    assert_eq!(out.metadata.params.dense_k, 60);
    assert_eq!(out.metadata.params.lexical_k, 60);
}

#[test]
fn strong_primary_keeps_primary() {
    let f = abc();
    let policy = FallbackPolicy {
        similarity_floor: 0.18,
        widen_by: 20,
        metric: SimilarityMetric::Cosine,
    };
    let out = HybridRetriever::new(params(2))
        .retrieve_with_fallback(&f.corpus(), "A", &f.embedder.vector("A"), &policy)
        .unwrap();
    assert_eq!(out.attempt, Attempt::Primary);
    assert!((out.top_similarity.unwrap() - 1.0).abs() < 1e-6);
}

#[test]
fn uncalibrated_metric_does_not_widen_on_low_scores() {
    let f = abc();
    let policy = FallbackPolicy {
        similarity_floor: 0.18,
        widen_by: 20,
        metric: SimilarityMetric::L2,
    };
    let out = HybridRetriever::new(params(2))
        .retrieve_with_fallback(&f.corpus(), "zzz", &f.embedder.vector("zzz"), &policy)
        .unwrap();
    assert_eq!(out.attempt, Attempt::Primary);
}

struct EmptyIndex {
    searches: AtomicUsize,
}

impl IVectorIndex for EmptyIndex {
    fn search(&self, _query: &[f32], _k: usize) -> DocentResult<Vec<(usize, f32)>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
    fn len(&self) -> usize {
        3
    }
    fn metric(&self) -> SimilarityMetric {
        SimilarityMetric::Cosine
    }
    fn dimensions(&self) -> usize {
        1
    }
}

struct NoLexical;

impl ILexicalIndex for NoLexical {
    fn score(&self, _query_tokens: &[String]) -> Vec<f32> {
        vec![0.0; 3]
    }
    fn len(&self) -> usize {
        3
    }
}

#[test]
fn no_hits_retries_once_and_returns_empty() {
    let index = EmptyIndex {
        searches: AtomicUsize::new(0),
    };
    let corpus = RetrievalCorpus {
        vector: &index,
        lexical: Some(&NoLexical),
        embeddings: None,
        chunk_count: 3,
    };
    let policy = FallbackPolicy {
        similarity_floor: 0.18,
        widen_by: 20,
        metric: SimilarityMetric::Cosine,
    };
    let out = HybridRetriever::new(params(3))
        .retrieve_with_fallback(&corpus, "anything", &[1.0], &policy)
        .unwrap();
    assert!(out.hits.is_empty());
    assert_eq!(out.attempt, Attempt::Fallback);
    assert_eq!(out.top_similarity, None);
    assert_eq!(index.searches.load(Ordering::SeqCst), 2);
}
