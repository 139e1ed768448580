use crate::api::{ServerConfiguration, TransferApi, UploadResult};
use crate::upload::configuration::ConfigurationGateway;
use crate::upload::selection::SelectedFile;
use crate::upload::session::UploadSession;
use crate::upload::submitter::UploadSubmitter;
use crate::upload::types::{SessionEvent, SessionSnapshot, UploadFailure};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Commands sent to a running session
#[derive(Debug, Clone)]
pub enum SessionCommand {
    SelectFile(SelectedFile),
    TriggerUpload,
}

/// Completion of a network operation started by the session
#[derive(Debug)]
enum Settlement {
    Configuration(Result<ServerConfiguration, UploadFailure>),
    Upload(Result<UploadResult, UploadFailure>),
}

/// Handle to an upload session for sending commands and observing its state
#[derive(Clone)]
pub struct UploadSessionHandle {
    command_tx: mpsc::UnboundedSender<SessionCommand>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl UploadSessionHandle {
    pub fn select_file(&self, file: SelectedFile) {
        let _ = self.command_tx.send(SessionCommand::SelectFile(file));
    }

    /// Ask for an upload of the current file. Ignored unless the session is
    /// ready with an admissible file.
    pub fn trigger_upload(&self) {
        let _ = self.command_tx.send(SessionCommand::TriggerUpload);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Wait until a snapshot satisfies `condition`. Returns `None` once the
    /// session has ended without getting there.
    pub async fn wait_for(
        &self,
        condition: impl FnMut(&SessionSnapshot) -> bool,
    ) -> Option<SessionSnapshot> {
        let mut rx = self.snapshot_rx.clone();
        let snapshot = rx.wait_for(condition).await.ok().map(|s| s.clone());
        snapshot
    }
}

/// Drives one [`UploadSession`] inside a single task.
///
/// Commands and network settlements are processed one at a time, so the
/// session state is never shared. The task ends when every handle is gone;
/// settlements still in flight at that point are dropped.
pub struct UploadSessionService {
    session: UploadSession,
    gateway: Arc<ConfigurationGateway>,
    submitter: UploadSubmitter,
    command_rx: mpsc::UnboundedReceiver<SessionCommand>,
    settlement_tx: mpsc::UnboundedSender<Settlement>,
    settlement_rx: mpsc::UnboundedReceiver<Settlement>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl UploadSessionService {
    /// Start a session. Loading the server configuration begins immediately.
    pub fn start(
        api: Arc<dyn TransferApi>,
        runtime_handle: tokio::runtime::Handle,
    ) -> (UploadSessionHandle, mpsc::UnboundedReceiver<SessionEvent>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (settlement_tx, settlement_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let session = UploadSession::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());

        let handle = UploadSessionHandle {
            command_tx,
            snapshot_rx,
        };

        let service = UploadSessionService {
            session,
            gateway: Arc::new(ConfigurationGateway::new(api.clone())),
            submitter: UploadSubmitter::new(api),
            command_rx,
            settlement_tx,
            settlement_rx,
            snapshot_tx,
            event_tx,
        };

        runtime_handle.spawn(service.run());

        (handle, event_rx)
    }

    async fn run(mut self) {
        info!("Upload session started");
        self.spawn_configuration_load();

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(settlement) = self.settlement_rx.recv() => {
                    self.handle_settlement(settlement);
                }
            }

            self.snapshot_tx.send_replace(self.session.snapshot());
        }

        info!("Upload session ended");
    }

    fn spawn_configuration_load(&self) {
        let gateway = self.gateway.clone();
        let settlement_tx = self.settlement_tx.clone();
        tokio::spawn(async move {
            let outcome = gateway.load().await;
            // Receiver is gone if the session ended meanwhile
            let _ = settlement_tx.send(Settlement::Configuration(outcome));
        });
    }

    fn spawn_upload(&self, file: Arc<SelectedFile>) {
        let submitter = self.submitter.clone();
        let settlement_tx = self.settlement_tx.clone();
        tokio::spawn(async move {
            let outcome = submitter.submit(&file).await;
            let _ = settlement_tx.send(Settlement::Upload(outcome));
        });
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::SelectFile(file) => {
                let file = self.session.select_file(file);
                self.emit(SessionEvent::FileSelected(file));
            }
            SessionCommand::TriggerUpload => {
                if let Some(file) = self.session.trigger_upload() {
                    info!("Uploading '{}' ({} bytes)", file.name, file.size_bytes);
                    self.emit(SessionEvent::UploadStarted(file.clone()));
                    self.spawn_upload(file);
                }
            }
        }
    }

    fn handle_settlement(&mut self, settlement: Settlement) {
        match settlement {
            Settlement::Configuration(outcome) => {
                let event = match &outcome {
                    Ok(configuration) => SessionEvent::ConfigurationLoaded(*configuration),
                    Err(failure) => SessionEvent::ConfigurationFailed(failure.clone()),
                };
                if self.session.configuration_settled(outcome) {
                    self.emit(event);
                }
            }
            Settlement::Upload(outcome) => {
                let failure = outcome.as_ref().err().cloned();
                match self.session.upload_settled(outcome) {
                    Some(result) => {
                        info!("Upload session completed with file {}", result.id);
                        self.emit(SessionEvent::Completed(result));
                    }
                    None => {
                        if let Some(failure) = failure {
                            warn!("Upload failed: {}", failure);
                            self.emit(SessionEvent::UploadFailed(failure));
                        }
                    }
                }
            }
        }
    }

    fn emit(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Session event dropped, nobody is listening");
        }
    }
}
