use thiserror::Error;

use crate::celestrak::QueryKind;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unknown query kind: {0}")]
    UnknownKind(String),
    #[error("invalid {kind} value '{value}': {reason}")]
    InvalidValue {
        kind: QueryKind,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP request to {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("dataset IO error: {0}")]
    Io(#[from] std::io::Error),
}
