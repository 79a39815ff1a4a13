use docent_core::traits::ILexicalIndex;

use crate::tokenize;

/// Up to `k` chunks with a positive lexical score, best first.
///
/// Ties keep ascending chunk order.
pub fn lexical_search(
    index: &dyn ILexicalIndex,
    query: &str,
    k: usize,
    chunk_count: usize,
) -> Vec<(usize, f32)> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return Vec::new();
    }
    let mut pairs: Vec<(usize, f32)> = index
        .score(&tokens)
        .into_iter()
        .enumerate()
        .filter(|(idx, score)| *idx < chunk_count && score.is_finite() && *score > 0.0)
        .collect();
    pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    pairs.truncate(k.max(1));
    pairs
}
