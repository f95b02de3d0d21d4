use crate::store::Operation;
use notitray_types::InvalidPayload;
use thiserror::Error;

/// Failure reported by a notifications API implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl From<InvalidPayload> for ApiError {
    fn from(e: InvalidPayload) -> Self {
        Self::InvalidPayload(e.0)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Network failure during {operation}: {source}")]
    NetworkFailure {
        operation: Operation,
        source: ApiError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// The operation that failed, for network failures
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::NetworkFailure { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
