//! Centralized configuration management for spendlog

use anyhow::{Context, Result};
use std::time::Duration;

/// The user id hard-coded into the original expense screen. Kept as the
/// default so the client talks to the same record store out of the box;
/// override with `SPENDLOG_USER_ID`.
pub const DEFAULT_USER_ID: &str = "864914213";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the expense service
    pub api_base_url: String,
    /// User id sent with every request
    pub user_id: String,
    /// Delay between a completed submit and signalling the owning screen (milliseconds)
    pub settle_delay_ms: u64,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "spendlog/0.1.0".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("SPENDLOG_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());

        let user_id =
            std::env::var("SPENDLOG_USER_ID").unwrap_or_else(|_| DEFAULT_USER_ID.to_string());

        let settle_delay_ms = parse_env_var("SPENDLOG_SETTLE_DELAY_MS")?.unwrap_or(2000);

        let http = HttpConfig {
            timeout_seconds: parse_env_var("SPENDLOG_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("SPENDLOG_USER_AGENT")
                .unwrap_or_else(|_| "spendlog/0.1.0".to_string()),
        };

        Ok(Config {
            api_base_url,
            user_id,
            settle_delay_ms,
            http,
        })
    }

    /// Get the post-submit settle delay as Duration
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:5000");
        assert_eq!(config.user_id, DEFAULT_USER_ID);
        assert_eq!(config.settle_delay_ms, 2000);
        assert_eq!(config.http.timeout_seconds, 30);
    }

    #[test]
    fn test_duration_accessors() {
        let config = Config::from_env().unwrap();
        assert_eq!(config.settle_delay(), Duration::from_millis(2000));
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
    }
}
