//! HTTP boundary to the transfer server.

pub mod client;
pub mod error;
pub mod models;
pub mod status;

pub use client::{HttpTransferApi, TransferApi};
pub use error::ApiError;
pub use models::{DownloadedFile, ServerConfiguration, UploadResult};
pub use status::{describe_code, FailureStatus};
