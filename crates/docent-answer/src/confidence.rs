//! Confidence tier from retrieval strength and support.

use docent_core::{ConfidenceTier, RetrievalHit};

const HIGH_MARGIN: f32 = 0.18;
const MEDIUM_MARGIN: f32 = 0.08;

/// Map hits to a confidence tier.
///
/// The strength signal is the best dense or fused score over all hits, so a
/// rerank that moves a weaker chunk to the top cannot lower the tier.
/// Support counts hits whose dense score clears `floor`.
pub fn compute_confidence(
    hits: &[RetrievalHit],
    floor: f32,
    rerank_scores: &[f32],
    insufficient: bool,
) -> ConfidenceTier {
    if insufficient || hits.is_empty() {
        return ConfidenceTier::Low;
    }
    let strength = hits
        .iter()
        .flat_map(|h| [h.dense_score, h.fused_score])
        .filter(|s| s.is_finite())
        .fold(f32::NEG_INFINITY, f32::max);
    let support = hits.iter().filter(|h| h.dense_score >= floor).count();
    let rerank_support = rerank_scores.iter().filter(|s| s.is_finite()).count();

    if strength >= floor + HIGH_MARGIN && support >= 3 {
        ConfidenceTier::High
    } else if strength >= floor + MEDIUM_MARGIN && (support >= 2 || rerank_support >= 2) {
        ConfidenceTier::Medium
    } else if strength >= floor && (support >= 1 || rerank_support >= 1) {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    }
}
