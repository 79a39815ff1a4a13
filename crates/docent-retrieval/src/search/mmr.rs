//! Maximal Marginal Relevance selection.

use crate::index::dot;

/// Greedily select up to `k` candidates trading relevance against redundancy.
///
/// Relevance is the dot product with `query`; redundancy is the highest dot
/// product with anything already selected. `lambda >= 1` skips the
/// redundancy term. Without embeddings the first `k` candidates are returned
/// unchanged. Candidates without an embedding row are skipped.
pub fn mmr_select(
    query: &[f32],
    embeddings: Option<&[Vec<f32>]>,
    candidates: &[usize],
    k: usize,
    lambda: f32,
) -> Vec<usize> {
    let Some(embeddings) = embeddings else {
        return candidates.iter().copied().take(k).collect();
    };
    if k == 0 {
        return Vec::new();
    }

    let mut remaining: Vec<(usize, f32)> = candidates
        .iter()
        .copied()
        .filter(|&idx| idx < embeddings.len())
        .map(|idx| (idx, dot(&embeddings[idx], query)))
        .collect();
    let mut selected: Vec<usize> = Vec::with_capacity(k.min(remaining.len()));
    let pure_relevance = lambda >= 1.0;

    while !remaining.is_empty() && selected.len() < k {
        let mut best: Option<(usize, f32)> = None;
        for (pos, &(idx, relevance)) in remaining.iter().enumerate() {
            let redundancy = if pure_relevance || selected.is_empty() {
                0.0
            } else {
                selected
                    .iter()
                    .map(|&s| dot(&embeddings[idx], &embeddings[s]))
                    .fold(f32::NEG_INFINITY, f32::max)
            };
            let score = if pure_relevance {
                relevance
            } else {
                lambda * relevance - (1.0 - lambda) * redundancy
            };
            // Strict comparison: earlier candidates win ties.
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((pos, score));
            }
        }
        let Some((pos, _)) = best else { break };
        selected.push(remaining.remove(pos).0);
    }
    selected
}
