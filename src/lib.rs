// Library exports for the desktop binary and integration tests

pub mod api;
pub mod app_context;
pub mod config;
pub mod ui;
pub mod units;
pub mod upload;

pub use app_context::AppContext;

// Test support for unit tests
#[cfg(test)]
pub mod test_support;
