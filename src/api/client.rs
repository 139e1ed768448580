use super::error::ApiError;
use super::models::{DownloadRequest, DownloadedFile, ServerConfiguration, UploadResult};
use super::status::FailureStatus;
use regex::Regex;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};

static FILE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("filename=\"(.*?)\"").expect("file name pattern is a valid regex")
});

/// Transfer server operations (allows mocking for tests)
#[async_trait::async_trait]
pub trait TransferApi: Send + Sync {
    /// `GET /api/configuration`
    async fn load_configuration(&self) -> Result<ServerConfiguration, ApiError>;

    /// `POST /api/files` with the raw file bytes as body
    async fn upload_file(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResult, ApiError>;

    /// `POST /api/files/{id}/download`
    async fn download_file(&self, id: &str, key: &str) -> Result<DownloadedFile, ApiError>;
}

/// Production transfer client talking HTTP to the server
#[derive(Clone)]
pub struct HttpTransferApi {
    client: Client,
    base_url: String,
}

impl HttpTransferApi {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("chest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl TransferApi for HttpTransferApi {
    async fn load_configuration(&self) -> Result<ServerConfiguration, ApiError> {
        let url = format!("{}/api/configuration", self.base_url);
        debug!("Loading server configuration from {}", url);

        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }

    async fn upload_file(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResult, ApiError> {
        let url = format!("{}/api/files", self.base_url);
        debug!(
            "Uploading '{}' ({}, {} bytes) to {}",
            file_name,
            mime_type,
            bytes.len(),
            url
        );

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, mime_type)
            .header(CONTENT_DISPOSITION, content_disposition(file_name))
            .body(bytes)
            .send()
            .await?;

        let result: UploadResult = read_json(response).await?;

        if result.id.is_empty() || result.key.is_empty() {
            return Err(ApiError::Malformed(
                "upload response without id or key".to_string(),
            ));
        }

        Ok(result)
    }

    async fn download_file(&self, id: &str, key: &str) -> Result<DownloadedFile, ApiError> {
        let url = format!(
            "{}/api/files/{}/download",
            self.base_url,
            urlencoding::encode(id)
        );
        debug!("Downloading file {} from {}", id, url);

        let response = self
            .client
            .post(&url)
            .json(&DownloadRequest { key })
            .send()
            .await?;

        let response = check_status(response)?;
        let file_name = file_name_from_headers(response.headers());
        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let bytes = response.bytes().await?.to_vec();

        Ok(DownloadedFile {
            file_name,
            mime_type,
            bytes,
        })
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!("Server answered {} for {}", status, response.url());
        Err(ApiError::Status {
            status: FailureStatus::from_code(status.as_u16()),
        })
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check_status(response)?;
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Malformed(e.to_string()))
}

/// Build the `Content-Disposition` value the server parses the file name from.
///
/// Quotes and control characters would end the quoted name early or make the
/// header invalid, so they are replaced.
pub fn content_disposition(file_name: &str) -> String {
    let cleaned: String = file_name
        .chars()
        .map(|c| if c == '"' { '\'' } else { c })
        .filter(|c| !c.is_control())
        .collect();
    format!("filename=\"{}\"", cleaned)
}

pub(crate) fn file_name_from_headers(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    FILE_NAME_REGEX
        .captures(value)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str().to_string())
        .filter(|name| !name.is_empty())
}
