//! Error types for the notitray-client crate.

use notitray_core::ApiError;

/// Errors that can occur talking to the notifications API
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Base URL cannot carry a path: {0}")]
    BaseUrl(String),

    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for ApiError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Status { code, body } => Self::Status { code, body },
            ClientError::Json(e) => Self::InvalidPayload(e.to_string()),
            e @ (ClientError::Http(_) | ClientError::Url(_) | ClientError::BaseUrl(_)) => {
                Self::Transport(e.to_string())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
