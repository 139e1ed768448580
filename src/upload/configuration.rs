use crate::api::{ServerConfiguration, TransferApi};
use crate::upload::types::UploadFailure;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Fetches the server limits once and remembers the outcome.
///
/// Repeated or concurrent calls to [`ConfigurationGateway::load`] share the first
/// request's settlement, success or failure. Retrying means building a new gateway.
pub struct ConfigurationGateway {
    api: Arc<dyn TransferApi>,
    outcome: OnceCell<Result<ServerConfiguration, UploadFailure>>,
}

impl ConfigurationGateway {
    pub fn new(api: Arc<dyn TransferApi>) -> Self {
        Self {
            api,
            outcome: OnceCell::new(),
        }
    }

    pub async fn load(&self) -> Result<ServerConfiguration, UploadFailure> {
        self.outcome
            .get_or_init(|| async {
                match self.api.load_configuration().await {
                    Ok(configuration) => {
                        info!(
                            "Server configuration loaded: max body {} bytes, files kept {} days",
                            configuration.body_max_size, configuration.days_file_available
                        );
                        Ok(configuration)
                    }
                    Err(e) => {
                        warn!("Failed to load server configuration: {}", e);
                        Err(UploadFailure::from(e))
                    }
                }
            })
            .await
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FailureStatus;
    use crate::test_support::MockTransferApi;

    fn limits() -> ServerConfiguration {
        ServerConfiguration {
            body_max_size: 1_000_000,
            days_file_available: 7,
        }
    }

    #[tokio::test]
    async fn test_loads_once() {
        let api = Arc::new(MockTransferApi::new());
        api.set_configuration(Ok(limits()));
        let gateway = ConfigurationGateway::new(api.clone());

        assert_eq!(gateway.load().await, Ok(limits()));
        assert_eq!(gateway.load().await, Ok(limits()));
        assert_eq!(api.configuration_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_remembered() {
        let api = Arc::new(MockTransferApi::new());
        api.set_configuration(Err(FailureStatus::Transport));
        let gateway = ConfigurationGateway::new(api.clone());

        let first = gateway.load().await.unwrap_err();
        assert_eq!(first.status, FailureStatus::Transport);

        // A later success from the server is never observed by this gateway
        api.set_configuration(Ok(limits()));
        assert_eq!(gateway.load().await.unwrap_err().status, FailureStatus::Transport);
        assert_eq!(api.configuration_calls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_request() {
        let api = Arc::new(MockTransferApi::new());
        api.set_configuration(Ok(limits()));
        let gateway = ConfigurationGateway::new(api.clone());

        let (a, b) = tokio::join!(gateway.load(), gateway.load());
        assert_eq!(a, b);
        assert_eq!(api.configuration_calls(), 1);
    }
}
