//! Property tests for citation stability and confidence monotonicity.

use docent_answer::{compute_confidence, prepare_sources};
use docent_core::RetrievalHit;
use proptest::prelude::*;
use test_fixtures::chunks_from_texts;

fn hit(idx: usize, dense: f32) -> RetrievalHit {
    RetrievalHit::new(idx, dense, 0.0, 0.0)
}

proptest! {
    #[test]
    fn citation_ids_follow_first_seen_order(order in Just(vec![0usize, 1, 2]).prop_shuffle()) {
        let chunks = chunks_from_texts(&["a", "b", "c"]);
        let hits: Vec<RetrievalHit> = order.iter().map(|&i| hit(i, 0.5)).collect();

        let first = prepare_sources(&hits, &chunks, 6);
        let second = prepare_sources(&hits, &chunks, 6);
        prop_assert_eq!(&first.lookup, &second.lookup);

        let ids: Vec<usize> = first.sources.iter().map(|s| s.id).collect();
        prop_assert_eq!(ids, vec![1, 2, 3]);
        for (pos, &chunk) in order.iter().enumerate() {
            prop_assert_eq!(first.citation_id(chunk), Some(pos + 1));
        }
    }

    #[test]
    fn ids_are_contiguous_with_duplicates(idxs in prop::collection::vec(0usize..8, 0..20)) {
        let chunks = chunks_from_texts(&["a", "b", "c", "d", "e"]);
        let hits: Vec<RetrievalHit> = idxs.iter().map(|&i| hit(i, 0.5)).collect();
        let prepared = prepare_sources(&hits, &chunks, 10);
        for (pos, source) in prepared.sources.iter().enumerate() {
            prop_assert_eq!(source.id, pos + 1);
        }
    }

    #[test]
    fn higher_top_score_never_lowers_confidence(
        scores in prop::collection::vec(0.0f32..1.0, 1..6),
        boost in 0.0f32..0.5,
        reranked in 0usize..4,
    ) {
        let floor = 0.18;
        let rerank: Vec<f32> = (0..reranked).map(|i| i as f32).collect();
        let base: Vec<RetrievalHit> = scores.iter().enumerate().map(|(i, &s)| hit(i, s)).collect();
        let mut boosted = base.clone();
        boosted[0].dense_score += boost;

        let before = compute_confidence(&base, floor, &rerank, false);
        let after = compute_confidence(&boosted, floor, &rerank, false);
        prop_assert!(after >= before);
    }

    #[test]
    fn more_support_never_lowers_confidence(
        scores in prop::collection::vec(0.0f32..1.0, 1..6),
        extra in 0.18f32..1.0,
    ) {
        let floor = 0.18;
        let base: Vec<RetrievalHit> = scores.iter().enumerate().map(|(i, &s)| hit(i, s)).collect();
        let mut supported = base.clone();
        supported.push(hit(base.len(), extra.min(base[0].dense_score.max(floor))));

        let before = compute_confidence(&base, floor, &[], false);
        let after = compute_confidence(&supported, floor, &[], false);
        prop_assert!(after >= before);
    }
}
