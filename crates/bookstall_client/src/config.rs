//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration shared by the gateway, session manager and stores.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the admin API, without a trailing slash.
    pub base_url: String,
    /// Transport-level request timeout.
    pub timeout: Duration,
    /// Default page size for list requests.
    pub page_size: u32,
    /// Quiescence window for debounced keyword search.
    pub debounce_delay: Duration,
    /// Where to persist the credential pair; in-memory only when absent.
    pub credential_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Creates a configuration for the given server.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: Duration::from_secs(30),
            page_size: 10,
            debounce_delay: Duration::from_millis(300),
            credential_path: None,
        }
    }

    /// Sets the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the default page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the debounce quiescence window.
    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = delay;
        self
    }

    /// Sets the credential persistence path.
    pub fn with_credential_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credential_path = Some(path.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = ClientConfig::new("https://shop.example.com/")
            .with_page_size(25)
            .with_timeout(Duration::from_secs(5))
            .with_debounce_delay(Duration::from_millis(150));

        assert_eq!(config.base_url, "https://shop.example.com");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.debounce_delay, Duration::from_millis(150));
        assert_eq!(config.credential_path, None);
    }
}
