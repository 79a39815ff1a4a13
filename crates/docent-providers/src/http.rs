//! Connection settings shared by the HTTP providers.

use std::time::Duration;

use reqwest::blocking::Client;

use docent_core::errors::{DocentError, DocentResult};

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Base URL without a trailing slash, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl HttpSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `<PREFIX>_BASE_URL` and `<PREFIX>_API_KEY`, falling back to `default_base`.
    pub fn from_env(prefix: &str, default_base: &str) -> Self {
        let base = std::env::var(format!("{prefix}_BASE_URL"))
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default_base.to_string());
        let mut settings = Self::new(base);
        settings.api_key = std::env::var(format!("{prefix}_API_KEY"))
            .ok()
            .filter(|v| !v.trim().is_empty());
        settings
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn client(&self) -> DocentResult<Client> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| DocentError::ConfigError(format!("http client: {e}")))
    }
}
