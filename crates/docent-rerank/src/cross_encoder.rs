use std::sync::Arc;
use std::time::Duration;

use docent_core::deadline::call_with_deadline;
use docent_core::errors::{DocentResult, RerankError};
use docent_core::traits::ICrossEncoder;

/// Score `candidates` with the cross-encoder and return the best `keep`
/// `(chunk index, score)` pairs, highest first.
///
/// Only the first `max(top_n, keep)` candidates are scored.
pub fn rerank_cross_encoder(
    model: &Arc<dyn ICrossEncoder>,
    query: &str,
    candidates: &[(usize, String)],
    top_n: usize,
    keep: usize,
    timeout: Duration,
) -> DocentResult<Vec<(usize, f32)>> {
    if keep == 0 || candidates.is_empty() {
        return Ok(Vec::new());
    }
    let trimmed: Vec<(usize, String)> = candidates
        .iter()
        .take(top_n.max(keep))
        .cloned()
        .collect();
    let texts: Vec<String> = trimmed.iter().map(|(_, t)| t.clone()).collect();

    let model = Arc::clone(model);
    let query = query.to_string();
    let scores = call_with_deadline("cross_encoder", timeout, move || {
        model.predict(&query, &texts).map_err(Into::into)
    })?;

    if scores.len() != trimmed.len() {
        return Err(RerankError::ScoreCountMismatch {
            expected: trimmed.len(),
            actual: scores.len(),
        }
        .into());
    }

    let mut ranked: Vec<(usize, f32)> = trimmed
        .iter()
        .map(|(idx, _)| *idx)
        .zip(scores)
        .filter(|(_, s)| s.is_finite())
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(keep);
    Ok(ranked)
}
