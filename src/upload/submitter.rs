use crate::api::{ApiError, TransferApi, UploadResult};
use crate::upload::selection::SelectedFile;
use crate::upload::types::UploadFailure;
use std::sync::Arc;
use tracing::{info, warn};

/// Performs one upload per call.
///
/// Callers are expected to check admissibility first; nothing is re-validated
/// here and concurrent calls for the same file are not deduplicated.
#[derive(Clone)]
pub struct UploadSubmitter {
    api: Arc<dyn TransferApi>,
}

impl UploadSubmitter {
    pub fn new(api: Arc<dyn TransferApi>) -> Self {
        Self { api }
    }

    pub async fn submit(&self, file: &SelectedFile) -> Result<UploadResult, UploadFailure> {
        let bytes = file.read_bytes().await.map_err(|e| {
            warn!("Failed to read '{}' for upload: {}", file.name, e);
            UploadFailure::from(ApiError::Io(e))
        })?;

        match self
            .api
            .upload_file(&file.name, &file.mime_type, bytes)
            .await
        {
            Ok(result) => {
                info!("Uploaded '{}' as {}", file.name, result.id);
                Ok(result)
            }
            Err(e) => {
                warn!("Upload of '{}' failed: {}", file.name, e);
                Err(UploadFailure::from(e))
            }
        }
    }
}
