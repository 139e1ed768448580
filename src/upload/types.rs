use crate::api::{ApiError, FailureStatus, ServerConfiguration, UploadResult};
use crate::upload::admissibility::Admissibility;
use crate::upload::selection::SelectedFile;
use std::fmt;
use std::sync::Arc;

/// Failure of a configuration load or an upload, as seen by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub status: FailureStatus,
    pub detail: String,
}

impl UploadFailure {
    pub fn new(status: FailureStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// User-facing text for this failure
    pub fn description(&self) -> String {
        self.status.description()
    }
}

impl From<ApiError> for UploadFailure {
    fn from(error: ApiError) -> Self {
        Self {
            status: error.status(),
            detail: error.to_string(),
        }
    }
}

impl fmt::Display for UploadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.status, self.detail)
    }
}

/// Where the server limits stand for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationStatus {
    Pending,
    Loaded(ServerConfiguration),
    Failed(UploadFailure),
}

impl ConfigurationStatus {
    pub fn loaded(&self) -> Option<&ServerConfiguration> {
        match self {
            ConfigurationStatus::Loaded(config) => Some(config),
            _ => None,
        }
    }
}

/// Sub-state of `Ready`, derived from the admissibility verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    NoFile,
    Inadmissible,
    Admissible,
}

/// Observable state of an upload session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initializing,
    Ready(Readiness),
    Uploading,
    Completed,
}

/// Point-in-time view of a session for callers and the UI
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub configuration: ConfigurationStatus,
    pub file: Option<Arc<SelectedFile>>,
    pub admissibility: Admissibility,
    pub last_failure: Option<UploadFailure>,
    pub result: Option<UploadResult>,
}

impl SessionSnapshot {
    pub fn can_upload(&self) -> bool {
        self.state == SessionState::Ready(Readiness::Admissible)
    }
}

/// Notifications emitted by a running session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ConfigurationLoaded(ServerConfiguration),
    ConfigurationFailed(UploadFailure),
    FileSelected(Arc<SelectedFile>),
    UploadStarted(Arc<SelectedFile>),
    UploadFailed(UploadFailure),
    /// Emitted at most once per session
    Completed(UploadResult),
}
