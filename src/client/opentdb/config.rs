use std::time::Duration;

/// Public OpenTDB endpoint.
pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";
/// Per-request timeout applied when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime configuration describing how to reach the trivia service.
#[derive(Debug, Clone)]
pub struct OpenTdbConfig {
    /// Service root; endpoint paths are appended to it.
    pub base_url: String,
    /// Upper bound on each HTTP request, connect and body included.
    pub request_timeout: Duration,
}

impl Default for OpenTdbConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl OpenTdbConfig {
    /// Construct a configuration targeting `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Apply the `TRIVIA_API_BASE_URL` environment override, if set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(base_url) = std::env::var("TRIVIA_API_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
        {
            self.base_url = base_url;
        }
        self
    }
}
