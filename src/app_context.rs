use crate::api::TransferApi;
use crate::config;
use std::sync::Arc;

/// Services built once in `main` and handed to the UI through the root context
#[derive(Clone)]
pub struct AppContext {
    pub config: config::Config,
    pub api: Arc<dyn TransferApi>,
    pub runtime_handle: tokio::runtime::Handle,
}
