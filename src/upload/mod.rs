// # Upload
//
// Upload orchestration: configuration gateway, file selection holder,
// admissibility evaluator, submitter and the session that ties them together.

pub mod admissibility;
pub mod configuration;
pub mod selection;
pub mod service;
pub mod session;
pub mod submitter;
pub mod types;

pub use admissibility::Admissibility;
pub use configuration::ConfigurationGateway;
pub use selection::{FileSelection, FileSource, SelectedFile};
pub use service::{SessionCommand, UploadSessionHandle, UploadSessionService};
pub use session::UploadSession;
pub use submitter::UploadSubmitter;
pub use types::{
    ConfigurationStatus, Readiness, SessionEvent, SessionSnapshot, SessionState, UploadFailure,
};
