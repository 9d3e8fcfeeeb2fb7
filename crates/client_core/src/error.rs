use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid user id {input:?}: expected an integer")]
    InvalidUserId { input: String },
    #[error("invalid api base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {url} returned {status}")]
    Status {
        method: &'static str,
        url: String,
        status: StatusCode,
    },
    #[error("invalid response payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Status {
                status: StatusCode::NOT_FOUND,
                ..
            }
        )
    }
}
