use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid shape: {0}")]
    Shape(String),
}
