//! Exact reference indexes. Brute force, sized for one session's corpus.

pub mod bm25;
pub mod flat;

pub use bm25::{Bm25Index, Bm25IndexBuilder};
pub use flat::{FlatVectorIndex, FlatVectorIndexBuilder};

/// Scale `v` to unit length in place. Zero vectors are left untouched.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

pub(crate) fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
