use std::fmt;
use std::time::Duration;

use reqwest::Url;

/// Endpoint of the Knowledge Graph Search API.
pub const DEFAULT_BASE_URL: &str = "https://kgsearch.googleapis.com/v1/entities:search";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable settings shared by every request the client issues.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: Url,
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Sets the per-request timeout. `None` waits on the upstream indefinitely.
    #[must_use]
    pub const fn with_request_timeout(mut self, request_timeout: Option<Duration>) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[must_use]
pub fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("valid Knowledge Graph API URL")
}
