pub mod app;
pub mod download;
pub mod error_page;
pub mod navbar;
pub mod upload;
pub mod upload_hooks;

pub use app::App;
pub use download::Download;
pub use error_page::{ErrorPage, PageNotFound};
pub use navbar::Navbar;
pub use upload::Upload;
