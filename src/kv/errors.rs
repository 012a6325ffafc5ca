use thiserror::Error;

#[derive(Debug, Error)]
pub enum KvError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status {status} from {operation}")]
    Status { operation: &'static str, status: u16 },

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage quota exceeded: {size} bytes, limit {limit}")]
    QuotaExceeded { size: usize, limit: usize },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<reqwest::Error> for KvError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            KvError::Decode(err.to_string())
        } else {
            KvError::Transport(err.to_string())
        }
    }
}

impl From<sqlx::Error> for KvError {
    fn from(err: sqlx::Error) -> Self {
        KvError::Database(err.to_string())
    }
}
