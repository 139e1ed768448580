use crate::api::{ServerConfiguration, UploadResult};
use crate::upload::admissibility::{self, Admissibility};
use crate::upload::selection::{FileSelection, SelectedFile};
use crate::upload::types::{
    ConfigurationStatus, Readiness, SessionSnapshot, SessionState, UploadFailure,
};
use std::sync::Arc;
use tracing::debug;

/// Lifecycle position of a session. The `Ready` sub-state is never stored,
/// it is derived from admissibility whenever the state is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Initializing,
    Idle,
    Uploading,
    Completed,
}

/// Upload orchestration state machine.
///
/// Pure and synchronous: network work is started by the caller with whatever
/// [`UploadSession::trigger_upload`] hands out, and its outcome is fed back in
/// through the `*_settled` methods. See [`crate::upload::UploadSessionService`]
/// for the async driver.
#[derive(Debug)]
pub struct UploadSession {
    phase: Phase,
    configuration: ConfigurationStatus,
    selection: FileSelection,
    last_failure: Option<UploadFailure>,
    result: Option<UploadResult>,
}

impl Default for UploadSession {
    fn default() -> Self {
        Self {
            phase: Phase::Initializing,
            configuration: ConfigurationStatus::Pending,
            selection: FileSelection::new(),
            last_failure: None,
            result: None,
        }
    }
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Initializing => SessionState::Initializing,
            Phase::Uploading => SessionState::Uploading,
            Phase::Completed => SessionState::Completed,
            Phase::Idle => SessionState::Ready(match self.admissibility() {
                Admissibility::Admissible => Readiness::Admissible,
                Admissibility::NoFile => Readiness::NoFile,
                Admissibility::TooLarge { .. } => Readiness::Inadmissible,
                Admissibility::NoConfiguration if self.selection.current().is_some() => {
                    Readiness::Inadmissible
                }
                Admissibility::NoConfiguration => Readiness::NoFile,
            }),
        }
    }

    pub fn admissibility(&self) -> Admissibility {
        let file = self.selection.current();
        admissibility::evaluate(self.configuration.loaded(), file.as_deref())
    }

    pub fn configuration(&self) -> &ConfigurationStatus {
        &self.configuration
    }

    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    /// Record the configuration load outcome. Only the first settlement counts.
    pub fn configuration_settled(
        &mut self,
        outcome: Result<ServerConfiguration, UploadFailure>,
    ) -> bool {
        if self.phase != Phase::Initializing {
            debug!("Ignoring configuration settlement outside of initialization");
            return false;
        }

        self.configuration = match outcome {
            Ok(configuration) => ConfigurationStatus::Loaded(configuration),
            Err(failure) => ConfigurationStatus::Failed(failure),
        };
        self.phase = Phase::Idle;
        true
    }

    /// Replace the selected file. Accepted in every state; an upload in flight
    /// keeps sending the file it started with.
    pub fn select_file(&mut self, file: SelectedFile) -> Arc<SelectedFile> {
        let file = self.selection.select(file);
        debug!(
            "Selected '{}' ({} bytes), session now {:?}",
            file.name,
            file.size_bytes,
            self.state()
        );
        file
    }

    /// Accept an upload trigger if the session is ready and the current file
    /// is admissible. Returns the file to submit, or `None` for a no-op.
    pub fn trigger_upload(&mut self) -> Option<Arc<SelectedFile>> {
        if self.phase != Phase::Idle || !self.admissibility().is_admissible() {
            debug!("Ignoring upload trigger in state {:?}", self.state());
            return None;
        }

        let file = self.selection.current()?;
        self.phase = Phase::Uploading;
        self.last_failure = None;
        Some(file)
    }

    /// Record the outcome of the running upload. Returns the result to publish
    /// on success; this happens at most once per session.
    pub fn upload_settled(
        &mut self,
        outcome: Result<UploadResult, UploadFailure>,
    ) -> Option<UploadResult> {
        if self.phase != Phase::Uploading {
            debug!("Ignoring upload settlement in state {:?}", self.state());
            return None;
        }

        match outcome {
            Ok(result) => {
                self.phase = Phase::Completed;
                self.result = Some(result.clone());
                Some(result)
            }
            Err(failure) => {
                self.phase = Phase::Idle;
                self.last_failure = Some(failure);
                None
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state(),
            configuration: self.configuration.clone(),
            file: self.selection.current(),
            admissibility: self.admissibility(),
            last_failure: self.last_failure.clone(),
            result: self.result.clone(),
        }
    }
}
