use criterion::{criterion_group, criterion_main, Criterion};

use docent_core::{RetrievalStrategy, SimilarityMetric};
use docent_retrieval::search::rrf_fusion::fuse;
use docent_retrieval::{
    tokenize, Bm25Index, FlatVectorIndex, HybridRetriever, RetrievalCorpus, RetrievalParams,
};

fn synthetic(n: usize, dims: usize) -> (Vec<Vec<f32>>, Vec<Vec<String>>) {
    let vectors = (0..n)
        .map(|i| (0..dims).map(|d| ((i * 31 + d * 7) % 97) as f32 / 97.0).collect())
        .collect();
    let tokens = (0..n)
        .map(|i| tokenize(&format!("chunk {i} mentions topic{} and topic{}", i % 13, i % 7)))
        .collect();
    (vectors, tokens)
}

fn bench_rrf(c: &mut Criterion) {
    let dense: Vec<usize> = (0..40).collect();
    let lexical: Vec<usize> = (20..60).rev().collect();
    c.bench_function("rrf_fuse_40x40", |b| b.iter(|| fuse(&dense, &lexical, 60, 6)));
}

fn bench_hybrid(c: &mut Criterion) {
    let (vectors, tokens) = synthetic(2_000, 64);
    let vector = FlatVectorIndex::new(&vectors, SimilarityMetric::Cosine).unwrap();
    let lexical = Bm25Index::new(&tokens);
    let corpus = RetrievalCorpus {
        vector: &vector,
        lexical: Some(&lexical),
        embeddings: Some(&vectors),
        chunk_count: vectors.len(),
    };
    let retriever = HybridRetriever::new(RetrievalParams {
        strategy: RetrievalStrategy::Hybrid,
        dense_k: 40,
        lexical_k: 40,
        fusion_rrf_k: 60,
        answer_top_k: 6,
        use_mmr: true,
        mmr_lambda: 0.7,
    });
    let query = vectors[17].clone();

    c.bench_function("hybrid_retrieve_2k", |b| {
        b.iter(|| retriever.retrieve(&corpus, "topic3 topic5", &query).unwrap())
    });
}

criterion_group!(benches, bench_rrf, bench_hybrid);
criterion_main!(benches);
