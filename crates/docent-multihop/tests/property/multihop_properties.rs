//! Property tests for candidate merging and sub-query planning.

use std::collections::HashSet;

use docent_core::RetrievalHit;
use docent_multihop::{merge_hits, plan_subqueries};
use proptest::prelude::*;

fn arb_hits() -> impl Strategy<Value = Vec<RetrievalHit>> {
    prop::collection::vec((0usize..20, 0.0f32..1.0, 0.0f32..0.1), 0..15).prop_map(|raw| {
        raw.into_iter()
            .map(|(idx, dense, fused)| RetrievalHit::new(idx, dense, 0.0, fused))
            .collect()
    })
}

proptest! {
    #[test]
    fn merge_is_bounded_and_unique(graph in arb_hits(), hybrid in arb_hits(), limit in 1usize..12) {
        let merged = merge_hits(&graph, &hybrid, limit);
        prop_assert!(merged.len() <= limit);
        let unique: HashSet<usize> = merged.iter().map(|h| h.idx).collect();
        prop_assert_eq!(unique.len(), merged.len());
    }

    #[test]
    fn merge_is_sorted_by_fused_then_dense(graph in arb_hits(), hybrid in arb_hits()) {
        let merged = merge_hits(&graph, &hybrid, 40);
        for pair in merged.windows(2) {
            let a = (pair[0].fused_score, pair[0].dense_score);
            let b = (pair[1].fused_score, pair[1].dense_score);
            prop_assert!(a >= b);
        }
    }

    #[test]
    fn merge_keeps_best_scores(hybrid in arb_hits()) {
        let merged = merge_hits(&[], &hybrid, 40);
        for hit in &merged {
            let best = hybrid
                .iter()
                .filter(|h| h.idx == hit.idx)
                .map(|h| h.dense_score)
                .fold(f32::NEG_INFINITY, f32::max);
            prop_assert_eq!(hit.dense_score, best);
        }
    }

    #[test]
    fn planner_respects_cap(query in "[a-z ?.!]{0,60}", max in 1usize..5) {
        let subs = plan_subqueries(&query, max);
        prop_assert!(subs.len() <= max);
        if !query.trim().is_empty() {
            prop_assert!(!subs.is_empty());
        }
        prop_assert!(subs.iter().all(|s| !s.is_empty()));
    }
}
