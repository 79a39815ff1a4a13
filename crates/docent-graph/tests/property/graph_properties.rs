use proptest::prelude::*;

use docent_core::models::Chunk;
use docent_graph::{traverse_graph, GraphStore};

const NAMES: [&str; 8] = [
    "Maria Lopez",
    "Postgres Cluster",
    "Lag Monitor",
    "Billing Service",
    "Frankfurt",
    "Pager Runbook",
    "Database Team",
    "Incident Commander",
];

fn corpus() -> impl Strategy<Value = Vec<Chunk>> {
    proptest::collection::vec(
        (0usize..4, proptest::collection::vec(0usize..NAMES.len(), 1..4)),
        0..60,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(doc, names)| {
                let text = names
                    .iter()
                    .map(|&n| NAMES[n])
                    .collect::<Vec<_>>()
                    .join(" met with the ");
                Chunk::new(format!("doc-{doc}"), 0, text.len(), text)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn traversal_respects_bounds(
        chunks in corpus(),
        seed_picks in proptest::collection::vec(0usize..NAMES.len(), 0..4),
        hops in 0usize..6,
    ) {
        let store = GraphStore::build(&[], &chunks, 5);
        let seeds: Vec<String> = seed_picks.iter().map(|&i| NAMES[i].to_lowercase()).collect();
        let result = traverse_graph(&store, &seeds, hops, 20);

        prop_assert!(result.chunk_indices.len() <= 20);
        prop_assert!(result.hops_used <= hops);
        prop_assert_eq!(result.paths.len(), result.chunk_indices.len());
        prop_assert_eq!(result.seed_count, seeds.len());

        let mut unique = result.chunk_indices.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(unique.len(), result.chunk_indices.len());
        prop_assert!(result.chunk_indices.iter().all(|&i| i < chunks.len()));
    }

    #[test]
    fn entity_keys_are_unique_and_lowercase(chunks in corpus()) {
        let store = GraphStore::build(&[], &chunks, 5);
        let keys: Vec<String> = store.entities().map(|e| e.id.clone()).collect();
        let mut unique = keys.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), keys.len());
        prop_assert!(keys.iter().all(|k| *k == k.to_lowercase()));
    }

    #[test]
    fn adjacency_is_symmetric(chunks in corpus()) {
        let store = GraphStore::build(&[], &chunks, 5);
        for edge in store.edges() {
            prop_assert!(store.neighbors(edge.source).contains(&edge.target));
            prop_assert!(store.neighbors(edge.target).contains(&edge.source));
        }
    }
}
