//! Transport configuration for the HTTP client.

use std::collections::HashMap;
use std::time::Duration;

/// HTTP transport options.
///
/// Everything defaults to "unset": no timeout beyond what reqwest applies,
/// no proxy, no extra headers.
///
/// # Example
/// ```rust
/// use slideshow_ai::options::TransportOptions;
/// use std::time::Duration;
///
/// let options = TransportOptions::new()
///     .with_timeout(Duration::from_secs(30))
///     .with_header("X-Trace".to_string(), "abc".to_string());
///
/// assert_eq!(options.timeout, Some(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Request timeout, covering connect and the whole body read
    pub timeout: Option<Duration>,

    /// HTTP proxy URL
    pub proxy: Option<String>,

    /// Additional HTTP headers to include in requests
    pub extra_headers: Option<HashMap<String, String>>,
}

impl TransportOptions {
    /// Create transport options with nothing configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the proxy URL.
    pub fn with_proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Set extra headers.
    pub fn with_extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }

    /// Add a single extra header.
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key, value);
        self
    }
}
