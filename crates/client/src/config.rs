//! Client configuration (API base URLs, timeouts).

use std::time::Duration;

pub const IDENTITY_URL_ENV: &str = "QWENHT_IDENTITY_URL";
pub const API_URL_ENV: &str = "QWENHT_API_URL";
pub const TIMEOUT_ENV: &str = "QWENHT_TIMEOUT_SECS";

const DEFAULT_IDENTITY_URL: &str = "http://localhost:5001";
const DEFAULT_API_URL: &str = "http://localhost:5001/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the two remote services live.
///
/// Account endpoints (`/api/account/*`) hang off `identity_server_url`;
/// navigation and user endpoints hang off `api_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub identity_server_url: String,
    pub api_url: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            identity_server_url: DEFAULT_IDENTITY_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `QWENHT_IDENTITY_URL`, `QWENHT_API_URL` and
    /// `QWENHT_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(IDENTITY_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config = config.with_identity_server_url(url);
        }
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config = config.with_api_url(url);
        }
        match lookup(TIMEOUT_ENV).map(|v| v.trim().parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
            Some(_) => tracing::warn!("ignoring invalid {TIMEOUT_ENV}"),
            None => {}
        }

        config
    }

    pub fn with_identity_server_url(mut self, url: impl Into<String>) -> Self {
        self.identity_server_url = normalize(url.into());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = normalize(url.into());
        self
    }
}

fn normalize(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}
