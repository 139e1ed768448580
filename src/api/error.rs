use super::status::FailureStatus;
use reqwest::Error as ReqwestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),
    #[error("Server rejected request: {status}")]
    Status { status: FailureStatus },
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Classify this error for display and recovery decisions
    pub fn status(&self) -> FailureStatus {
        match self {
            ApiError::Request(e) => match e.status() {
                Some(status) => FailureStatus::from_code(status.as_u16()),
                None if e.is_decode() => FailureStatus::MalformedResponse,
                None => FailureStatus::Transport,
            },
            ApiError::Status { status } => *status,
            ApiError::Malformed(_) => FailureStatus::MalformedResponse,
            ApiError::Io(_) => FailureStatus::FileUnreadable,
        }
    }
}
