use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::sync::watch;

pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Where the bytes of a selected file come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Read from disk when the upload starts
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

/// A file chosen by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub source: FileSource,
}

impl SelectedFile {
    /// Describe a file on disk. Size comes from the file's metadata at selection time.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            mime_type: guess_mime_type(&name).to_string(),
            name,
            size_bytes: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            source: FileSource::Memory(bytes.into()),
        }
    }

    /// Read the content measured at selection time.
    ///
    /// A file on disk whose length no longer matches `size_bytes` is an error;
    /// at most one byte past the measured size is ever read.
    pub async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => {
                let file = tokio::fs::File::open(path).await?;
                let mut bytes = Vec::new();
                file.take(self.size_bytes.saturating_add(1))
                    .read_to_end(&mut bytes)
                    .await?;

                if bytes.len() as u64 != self.size_bytes {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!(
                            "{} changed since it was selected ({} bytes expected)",
                            path.display(),
                            self.size_bytes
                        ),
                    ));
                }
                Ok(bytes)
            }
            FileSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}

/// Guess a MIME type from the file extension
pub fn guess_mime_type(file_name: &str) -> &'static str {
    let extension = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => return FALLBACK_MIME_TYPE,
    };

    match extension.as_str() {
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "7z" => "application/x-7z-compressed",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "flac" => "audio/flac",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => FALLBACK_MIME_TYPE,
    }
}

/// Holds the current selection and notifies subscribers whenever it changes
#[derive(Debug)]
pub struct FileSelection {
    current: watch::Sender<Option<Arc<SelectedFile>>>,
}

impl Default for FileSelection {
    fn default() -> Self {
        Self {
            current: watch::Sender::new(None),
        }
    }
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection. No validation happens here.
    pub fn select(&self, file: SelectedFile) -> Arc<SelectedFile> {
        let file = Arc::new(file);
        self.current.send_replace(Some(file.clone()));
        file
    }

    pub fn current(&self) -> Option<Arc<SelectedFile>> {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<SelectedFile>>> {
        self.current.subscribe()
    }
}
