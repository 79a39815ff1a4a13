use std::collections::HashSet;

use docent_core::RetrievalHit;

/// Reorder `hits` so the reranked ids come first, in `ranked` order with
/// their rerank scores. Every other hit follows in its original order
/// without a rerank score. Returns the scores that were applied.
pub fn splice(hits: &mut Vec<RetrievalHit>, ranked: &[(usize, f32)]) -> Vec<f32> {
    let mut taken: HashSet<usize> = HashSet::with_capacity(ranked.len());
    let mut head: Vec<RetrievalHit> = Vec::with_capacity(hits.len());
    let mut scores = Vec::with_capacity(ranked.len());

    for &(idx, score) in ranked {
        if taken.contains(&idx) {
            continue;
        }
        if let Some(base) = hits.iter().find(|h| h.idx == idx) {
            head.push(RetrievalHit {
                rerank_score: Some(score),
                ..base.clone()
            });
            scores.push(score);
            taken.insert(idx);
        }
    }

    if head.is_empty() {
        return scores;
    }

    for hit in hits.iter() {
        if !taken.contains(&hit.idx) {
            head.push(RetrievalHit {
                rerank_score: None,
                ..hit.clone()
            });
        }
    }
    *hits = head;
    scores
}
