use thiserror::Error;

use crate::kv::KvError;

#[derive(Debug, Error)]
pub enum HighscoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] KvError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid highscore data: {0}")]
    InvalidData(String),

    #[error("Highscore version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },
}
