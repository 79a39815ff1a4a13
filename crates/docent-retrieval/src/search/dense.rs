use docent_core::errors::DocentResult;
use docent_core::traits::IVectorIndex;

/// Up to `k` `(chunk index, similarity)` pairs from the vector index.
///
/// Ids outside `0..chunk_count` are dropped so every later stage can index
/// the chunk list directly.
pub fn dense_search(
    index: &dyn IVectorIndex,
    query: &[f32],
    k: usize,
    chunk_count: usize,
) -> DocentResult<Vec<(usize, f32)>> {
    if index.is_empty() {
        return Ok(Vec::new());
    }
    let mut pairs = index.search(query, k.max(1))?;
    pairs.retain(|(idx, score)| *idx < chunk_count && score.is_finite());
    Ok(pairs)
}
