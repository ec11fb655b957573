//! Configuration Module
//!
//! Loads content API and gateway settings from environment variables.
//! Cache TTLs and capacities are fixed per data kind and live in
//! [`crate::cache::CachePolicy`].

use std::env;
use std::time::Duration;

/// Default header carrying the static API key.
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the content API, without the `/mobile-api` suffix
    pub api_base_url: String,
    /// HTTP Basic user name
    pub api_username: Option<String>,
    /// HTTP Basic password
    pub api_password: Option<String>,
    /// Static API key sent with every request
    pub api_key: Option<String>,
    /// Header name used for `api_key`
    pub api_key_header: String,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
    /// Gateway HTTP port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CONTENT_API_URL` - Content API base URL (default: http://localhost:8080)
    /// - `CONTENT_API_USER` / `CONTENT_API_PASSWORD` - Basic auth credentials
    /// - `CONTENT_API_KEY` - Static API key
    /// - `CONTENT_API_KEY_HEADER` - Header for the API key (default: X-API-Key)
    /// - `REQUEST_TIMEOUT` - Request timeout in seconds (default: 30)
    /// - `SERVER_PORT` - Gateway port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: non_empty_var("CONTENT_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            api_username: non_empty_var("CONTENT_API_USER"),
            api_password: non_empty_var("CONTENT_API_PASSWORD"),
            api_key: non_empty_var("CONTENT_API_KEY"),
            api_key_header: non_empty_var("CONTENT_API_KEY_HEADER")
                .unwrap_or(defaults.api_key_header),
            request_timeout: env::var("REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            api_username: None,
            api_password: None,
            api_key: None,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            request_timeout: 30,
            server_port: 3000,
        }
    }
}
