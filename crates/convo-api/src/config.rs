use std::time::Duration;

/// Where the backend listens when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Connection settings shared by every client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Server origin, normalized: has a scheme, no trailing slash
    pub base_url: String,
    /// `None` waits forever, like the browser widget does
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Normalize a user-supplied server URL.
///
/// Adds `http://` when no scheme is given and strips trailing slashes, so
/// endpoint paths can be appended directly.
pub fn normalize_base_url(url: &str) -> String {
    let url = url.trim();
    let url = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    };
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_scheme() {
        assert_eq!(normalize_base_url("localhost:8000"), "http://localhost:8000");
    }

    #[test]
    fn test_normalize_strips_trailing_slash() {
        assert_eq!(normalize_base_url("https://bot.example.com/"), "https://bot.example.com");
        assert_eq!(normalize_base_url(" http://h/prefix// "), "http://h/prefix");
    }

    #[test]
    fn test_default_has_no_timeout() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, None);
    }
}
