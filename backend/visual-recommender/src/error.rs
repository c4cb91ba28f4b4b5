use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A feature block ended before all of its floats were read.
    #[error("Truncated record for item {item_id}: expected {expected} feature bytes, got {actual}")]
    TruncatedRecord {
        item_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("Feature vector for item {item_id} has {actual} values, store holds {expected}")]
    DimensionMismatch {
        item_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid item identifier: {0}")]
    InvalidItemId(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// True for errors that mean the feature file itself is malformed.
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            AppError::TruncatedRecord { .. } | AppError::InvalidItemId(_)
        )
    }
}
