//! Centralized configuration management for shopadmin

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result};
use reqwest::Url;

/// Default backend address used by every screen
pub const DEFAULT_BASE_URL: &str = "http://localhost:10000";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the REST backend
    pub base_url: String,
    /// File that receives log output while the TUI owns the terminal
    pub log_file: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds. `None` waits indefinitely.
    pub timeout_seconds: Option<u64>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: "shopadmin/0.1.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_file: PathBuf::from("shopadmin.log"),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("SHOPADMIN_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let log_file = std::env::var("SHOPADMIN_LOG_FILE")
            .unwrap_or_else(|_| "shopadmin.log".to_string())
            .into();

        let http = HttpConfig {
            timeout_seconds: parse_env_var("SHOPADMIN_HTTP_TIMEOUT_SECONDS")?,
            user_agent: std::env::var("SHOPADMIN_USER_AGENT")
                .unwrap_or_else(|_| "shopadmin/0.1.0".to_string()),
        };

        Ok(Config {
            base_url,
            log_file,
            http,
        })
    }

    /// Replace the backend address, e.g. from a command line flag
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http.timeout_seconds.map(Duration::from_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid backend URL: {}", self.base_url))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(anyhow::anyhow!(
                "Backend URL must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.http.timeout_seconds == Some(0) {
            return Err(anyhow::anyhow!("HTTP timeout must be at least one second"));
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
