//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default endpoint of the XML search service.
pub const DEFAULT_BASE_URL: &str = "https://yandex.ru/search/xml";

/// Connection settings shared by every search made with one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service endpoint, without query string.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Subscriber login (`user` URL parameter).
    pub user: String,
    /// Subscriber API key (`key` URL parameter).
    pub key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Skip TLS certificate verification. Off unless explicitly enabled.
    #[serde(default)]
    pub accept_invalid_certs: bool,
    /// User-Agent header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("yandex-xml/", env!("CARGO_PKG_VERSION")).to_string()
}

impl ClientConfig {
    /// Creates a configuration for the given subscriber credentials.
    pub fn new(user: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            user: user.into(),
            key: key.into(),
            timeout: default_timeout(),
            accept_invalid_certs: false,
            user_agent: default_user_agent(),
        }
    }

    /// Sets the service endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Disables TLS certificate verification.
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Returns the timeout as a [`Duration`].
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
