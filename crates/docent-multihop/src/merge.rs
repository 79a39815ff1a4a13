use std::cmp::Ordering;
use std::collections::HashMap;

use docent_core::RetrievalHit;

/// Merge graph and hybrid candidates by chunk index.
///
/// Duplicates keep the maximum of every score dimension. The result is
/// sorted by `(rerank, fused, dense)` descending, first occurrence winning
/// ties, and truncated to `limit`.
pub fn merge_hits(
    graph: &[RetrievalHit],
    hybrid: &[RetrievalHit],
    limit: usize,
) -> Vec<RetrievalHit> {
    let mut merged: Vec<RetrievalHit> = Vec::with_capacity(graph.len() + hybrid.len());
    let mut position: HashMap<usize, usize> = HashMap::new();

    for hit in graph.iter().chain(hybrid) {
        match position.get(&hit.idx) {
            Some(&pos) => {
                let base = &mut merged[pos];
                base.dense_score = base.dense_score.max(hit.dense_score);
                base.lexical_score = base.lexical_score.max(hit.lexical_score);
                base.fused_score = base.fused_score.max(hit.fused_score);
                base.rerank_score = match (base.rerank_score, hit.rerank_score) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                };
            }
            None => {
                position.insert(hit.idx, merged.len());
                merged.push(hit.clone());
            }
        }
    }

    merged.sort_by(|a, b| {
        let key_a = (a.rerank_score.unwrap_or(0.0), a.fused_score, a.dense_score);
        let key_b = (b.rerank_score.unwrap_or(0.0), b.fused_score, b.dense_score);
        key_b.partial_cmp(&key_a).unwrap_or(Ordering::Equal)
    });
    merged.truncate(limit);
    merged
}
