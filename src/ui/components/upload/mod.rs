mod configuration_info;
mod file_chooser;
mod file_info;
mod file_uploader;
mod page;
mod upload_information;

pub use configuration_info::ConfigurationInfo;
pub use file_chooser::FileChooser;
pub use file_info::FileInfo;
pub use file_uploader::FileUploader;
pub use page::Upload;
pub use upload_information::UploadInformation;
