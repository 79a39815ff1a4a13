//! Reciprocal Rank Fusion: score = Σ 1/(k + rank + 1), rank 0-based.
//!
//! Combines the dense and lexical orders without normalizing their scores
//! against each other.

use std::cmp::Ordering;
use std::collections::HashMap;

/// A chunk after fusion, with the positions used for tie-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedCandidate {
    pub idx: usize,
    pub fused_score: f32,
    pub dense_rank: Option<usize>,
    pub lexical_rank: Option<usize>,
}

/// Fuse the dense and lexical orders.
///
/// Output is sorted by fused score descending; ties go to the better dense
/// position, then the better lexical position, then the lower chunk index.
/// At most `max(top_k, dense.len(), lexical.len())` candidates are returned.
pub fn fuse(dense: &[usize], lexical: &[usize], k_rrf: u32, top_k: usize) -> Vec<FusedCandidate> {
    let mut by_idx: HashMap<usize, FusedCandidate> = HashMap::new();
    let k = k_rrf as f32;

    for (list, is_dense) in [(dense, true), (lexical, false)] {
        for (rank, &idx) in list.iter().enumerate() {
            let entry = by_idx.entry(idx).or_insert(FusedCandidate {
                idx,
                fused_score: 0.0,
                dense_rank: None,
                lexical_rank: None,
            });
            entry.fused_score += 1.0 / (k + rank as f32 + 1.0);
            let slot = if is_dense {
                &mut entry.dense_rank
            } else {
                &mut entry.lexical_rank
            };
            if slot.is_none() {
                *slot = Some(rank);
            }
        }
    }

    let mut fused: Vec<FusedCandidate> = by_idx.into_values().collect();
    fused.sort_by(compare);
    fused.truncate(top_k.max(dense.len()).max(lexical.len()));
    fused
}

fn compare(a: &FusedCandidate, b: &FusedCandidate) -> Ordering {
    b.fused_score
        .partial_cmp(&a.fused_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| rank_key(a.dense_rank).cmp(&rank_key(b.dense_rank)))
        .then_with(|| rank_key(a.lexical_rank).cmp(&rank_key(b.lexical_rank)))
        .then_with(|| a.idx.cmp(&b.idx))
}

fn rank_key(rank: Option<usize>) -> usize {
    rank.unwrap_or(usize::MAX)
}
