/// Vector and lexical index errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("no vectors provided")]
    EmptyCorpus,

    #[error("dimension mismatch at row {row}: expected {expected}, got {actual}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("index build failed: {reason}")]
    BuildFailed { reason: String },
}
