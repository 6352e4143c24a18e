use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("audit entry {index} is invalid: {message}")]
    InvalidEntry { index: usize, message: String },
}
