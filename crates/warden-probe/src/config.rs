use std::time::Duration;

/// Base URL used when none is given
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Connect + read timeout applied to every request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Target of a probe run. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl ProbeConfig {
    /// The base URL is kept verbatim; an unusable one surfaces later as a
    /// transport failure on each request rather than here.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bearer credential attached to outgoing requests. Empty strings are ignored.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// True when the base URL uses plain `http`. Unparseable URLs report false.
    pub fn is_plaintext(&self) -> bool {
        reqwest::Url::parse(&self.base_url)
            .map(|url| url.scheme() == "http")
            .unwrap_or(false)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
