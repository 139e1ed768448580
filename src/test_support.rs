// Test support utilities for both unit and integration tests

use crate::api::{
    ApiError, DownloadedFile, FailureStatus, ServerConfiguration, TransferApi, UploadResult,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;

/// An upload as received by [`MockTransferApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Mock transfer server for testing
///
/// Answers from scripted responses kept in memory. Configuration loads and
/// uploads can be held open to simulate slow requests.
pub struct MockTransferApi {
    configuration: Mutex<Result<ServerConfiguration, FailureStatus>>,
    upload_responses: Mutex<VecDeque<Result<UploadResult, FailureStatus>>>,
    uploads: Mutex<Vec<RecordedUpload>>,
    configuration_calls: AtomicUsize,
    configuration_gate: watch::Sender<bool>,
    upload_gate: watch::Sender<bool>,
}

impl Default for MockTransferApi {
    fn default() -> Self {
        MockTransferApi {
            configuration: Mutex::new(Ok(ServerConfiguration {
                body_max_size: 1_000_000,
                days_file_available: 7,
            })),
            upload_responses: Mutex::new(VecDeque::new()),
            uploads: Mutex::new(Vec::new()),
            configuration_calls: AtomicUsize::new(0),
            configuration_gate: watch::Sender::new(true),
            upload_gate: watch::Sender::new(true),
        }
    }
}

impl MockTransferApi {
    /// Create a new mock answering with 1 MB / 7 days limits
    #[allow(unused)] // Used in tests
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_configuration(&self, response: Result<ServerConfiguration, FailureStatus>) {
        *self.configuration.lock().unwrap() = response;
    }

    /// Queue the answer for the next upload. Without a queued answer uploads
    /// succeed with generated id/key pairs.
    pub fn push_upload_response(&self, response: Result<UploadResult, FailureStatus>) {
        self.upload_responses.lock().unwrap().push_back(response);
    }

    /// Keep configuration requests pending until [`Self::release_configuration`]
    pub fn hold_configuration(&self) {
        self.configuration_gate.send_replace(false);
    }

    pub fn release_configuration(&self) {
        self.configuration_gate.send_replace(true);
    }

    /// Keep upload requests pending until [`Self::release_uploads`]
    pub fn hold_uploads(&self) {
        self.upload_gate.send_replace(false);
    }

    pub fn release_uploads(&self) {
        self.upload_gate.send_replace(true);
    }

    pub fn configuration_calls(&self) -> usize {
        self.configuration_calls.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

async fn wait_open(gate: &watch::Sender<bool>) {
    let mut rx = gate.subscribe();
    let _ = rx.wait_for(|open| *open).await;
}

#[async_trait::async_trait]
impl TransferApi for MockTransferApi {
    async fn load_configuration(&self) -> Result<ServerConfiguration, ApiError> {
        self.configuration_calls.fetch_add(1, Ordering::SeqCst);
        wait_open(&self.configuration_gate).await;

        let response = self.configuration.lock().unwrap().clone();
        response.map_err(|status| ApiError::Status { status })
    }

    async fn upload_file(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResult, ApiError> {
        let number = {
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push(RecordedUpload {
                file_name: file_name.to_string(),
                mime_type: mime_type.to_string(),
                bytes,
            });
            uploads.len()
        };
        wait_open(&self.upload_gate).await;

        let scripted = self.upload_responses.lock().unwrap().pop_front();
        match scripted {
            Some(response) => response.map_err(|status| ApiError::Status { status }),
            None => Ok(UploadResult {
                id: format!("file-{}", number),
                key: format!("key-{}", number),
            }),
        }
    }

    /// The mock stores nothing, so every id is unknown
    async fn download_file(&self, _id: &str, _key: &str) -> Result<DownloadedFile, ApiError> {
        Err(ApiError::Status {
            status: FailureStatus::NotFound,
        })
    }
}
