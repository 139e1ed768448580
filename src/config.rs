use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Server URL must start with http:// or https://, got '{0}'")]
    InvalidServerUrl(String),
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Application configuration
/// In debug builds: also loads a .env file from the working directory
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base URL of the transfer server, without the `/api` suffix
    pub server_url: String,
    /// Upper bound for a single request, uploads included
    pub request_timeout: Duration,
    /// Where the download dialog starts
    pub download_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            download_dir: dirs::download_dir(),
        }
    }
}

impl Config {
    /// Load configuration based on build mode
    pub fn load() -> Result<Self, ConfigError> {
        #[cfg(debug_assertions)]
        {
            if dotenvy::dotenv().is_ok() {
                info!("Config: Dev mode activated - loaded .env file");
            } else {
                info!("Config: No .env file found, using environment only");
            }
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from a variable lookup (environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let server_url = lookup("CHEST_SERVER_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.server_url);

        let request_timeout = match lookup("CHEST_REQUEST_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "CHEST_REQUEST_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => defaults.request_timeout,
        };

        let download_dir = lookup("CHEST_DOWNLOAD_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or(defaults.download_dir);

        let config = Self {
            server_url,
            request_timeout,
            download_dir,
        };
        config.validate()?;

        info!(
            "Config: server {} (timeout {}s)",
            config.server_url,
            config.request_timeout.as_secs()
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::InvalidServerUrl(self.server_url.clone()));
        }
        Ok(())
    }
}

/// Hook to access the configuration from components
pub fn use_config() -> Config {
    dioxus::prelude::use_context::<crate::AppContext>().config
}
