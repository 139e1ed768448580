use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Limits announced by the server at `GET /api/configuration`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfiguration {
    #[serde(rename = "BodyMaxSize")]
    pub body_max_size: u64,
    #[serde(rename = "DaysFileAvailable")]
    pub days_file_available: u64,
}

impl ServerConfiguration {
    /// Point in time after which an upload made at `now` is gone
    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let days = i64::try_from(self.days_file_available).unwrap_or(i64::MAX);
        now.checked_add_signed(Duration::try_days(days).unwrap_or(Duration::MAX))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Identifier/key pair returned by `POST /api/files`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub id: String,
    pub key: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DownloadRequest<'a> {
    pub key: &'a str,
}

/// File returned by `POST /api/files/{id}/download`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}
