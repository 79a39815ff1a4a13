use proptest::prelude::*;

use docent_retrieval::search::mmr::mmr_select;
use docent_retrieval::search::rrf_fusion::{fuse, FusedCandidate};

fn distinct_list(max: usize) -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::btree_set(0usize..40, 0..max)
        .prop_map(|s| s.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

proptest! {
    // ── RRF determinism ──

    #[test]
    fn rrf_is_deterministic(
        dense in distinct_list(15),
        lexical in distinct_list(15),
        k in 1u32..100,
    ) {
        let a = fuse(&dense, &lexical, k, 5);
        let b = fuse(&dense, &lexical, k, 5);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn rrf_scores_non_increasing(dense in distinct_list(15), lexical in distinct_list(15)) {
        let fused = fuse(&dense, &lexical, 60, 5);
        for w in fused.windows(2) {
            prop_assert!(w[0].fused_score >= w[1].fused_score);
        }
    }

    #[test]
    fn rrf_output_has_no_duplicates(dense in distinct_list(15), lexical in distinct_list(15)) {
        let fused = fuse(&dense, &lexical, 60, 3);
        let mut ids: Vec<usize> = fused.iter().map(|c| c.idx).collect();
        let n = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), n);
        prop_assert!(n <= 3usize.max(dense.len()).max(lexical.len()));
    }

    #[test]
    fn shared_item_outranks_single_list_item_at_same_rank(rank in 0usize..10, k in 1u32..100) {
        let dense_prefix: Vec<usize> = (0..rank).collect();
        let lexical_prefix: Vec<usize> = (50..50 + rank).collect();
        let with = |prefix: &[usize], tail: &[usize]| [prefix, tail].concat();

        // Same rank, both lists vs one list.
        let both = fuse(&with(&dense_prefix, &[100]), &with(&lexical_prefix, &[100]), k, 64);
        let single = fuse(&with(&dense_prefix, &[200]), &lexical_prefix, k, 64);
        let score = |fused: &[FusedCandidate], id: usize| {
            fused.iter().find(|c| c.idx == id).map(|c| c.fused_score)
        };
        prop_assert!(score(&both, 100).is_some() && score(&single, 200).is_some());
        prop_assert!(score(&both, 100) > score(&single, 200));

        // One fused list: 100 at `rank` in dense, 300 at `rank` in lexical only.
        let dense = with(&dense_prefix, &[100, 200]);
        let lexical = with(&lexical_prefix, &[300, 100]);
        let fused = fuse(&dense, &lexical, k, dense.len() + lexical.len());
        let pos = |id: usize| fused.iter().position(|c| c.idx == id);
        prop_assert!(pos(100).is_some() && pos(200).is_some() && pos(300).is_some());
        prop_assert!(pos(100) < pos(200));
        prop_assert!(pos(100) < pos(300));
    }

    // ── MMR bounds ──

    #[test]
    fn mmr_never_exceeds_bounds(
        n in 0usize..12,
        k in 0usize..15,
        lambda in 0.0f32..=1.0,
        seed in proptest::collection::vec(-1.0f32..1.0, 36),
    ) {
        let embeddings: Vec<Vec<f32>> =
            (0..n).map(|i| seed[i * 3..i * 3 + 3].to_vec()).collect();
        let candidates: Vec<usize> = (0..n).collect();
        let picked = mmr_select(&[0.3, -0.2, 0.9], Some(&embeddings), &candidates, k, lambda);
        prop_assert!(picked.len() <= k.min(candidates.len()));
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), picked.len());
    }

    #[test]
    fn mmr_lambda_one_is_relevance_order(
        n in 1usize..12,
        seed in proptest::collection::vec(-1.0f32..1.0, 36),
    ) {
        let query = [0.5f32, 0.5, -0.25];
        let embeddings: Vec<Vec<f32>> =
            (0..n).map(|i| seed[i * 3..i * 3 + 3].to_vec()).collect();
        let candidates: Vec<usize> = (0..n).collect();
        let picked = mmr_select(&query, Some(&embeddings), &candidates, n, 1.0);

        let mut expected = candidates.clone();
        let rel = |i: usize| embeddings[i].iter().zip(&query).map(|(a, b)| a * b).sum::<f32>();
        expected.sort_by(|&a, &b| rel(b).partial_cmp(&rel(a)).unwrap());
        prop_assert_eq!(picked, expected);
    }
}
