//! Client configuration.

/// Default backend URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default path of the streaming chat endpoint.
pub const DEFAULT_STREAM_PATH: &str = "/api/chat";

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`ChatClient`](crate::client::ChatClient).
///
/// Use the builder methods to customize.
///
/// # Example
///
/// ```
/// use streamchat::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("http://10.0.0.5:8000/")
///     .with_workspace_path("/srv/project");
/// assert_eq!(config.stream_url(), "http://10.0.0.5:8000/api/chat");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL
    pub base_url: String,
    /// Path of the streaming endpoint
    pub stream_path: String,
    /// Directory the workspace view shows; refreshed after tool results
    pub workspace_path: String,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            stream_path: DEFAULT_STREAM_PATH.to_string(),
            workspace_path: ".".to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the streaming endpoint path.
    pub fn with_stream_path(mut self, path: impl Into<String>) -> Self {
        self.stream_path = path.into();
        self
    }

    /// Set the workspace directory.
    pub fn with_workspace_path(mut self, path: impl Into<String>) -> Self {
        self.workspace_path = path.into();
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Full URL of the streaming endpoint.
    pub fn stream_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.stream_path.trim_start_matches('/')
        )
    }

    /// Create config from environment variables.
    ///
    /// - `STREAMCHAT_URL` - backend base URL
    /// - `STREAMCHAT_STREAM_PATH` - streaming endpoint path
    /// - `STREAMCHAT_WORKSPACE` - workspace directory
    /// - `STREAMCHAT_CONNECT_TIMEOUT` - connect timeout in seconds
    ///
    /// Unset variables keep their defaults, as does an unparsable timeout.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("STREAMCHAT_URL") {
            config = config.with_base_url(url);
        }
        if let Ok(path) = std::env::var("STREAMCHAT_STREAM_PATH") {
            config = config.with_stream_path(path);
        }
        if let Ok(path) = std::env::var("STREAMCHAT_WORKSPACE") {
            config = config.with_workspace_path(path);
        }
        if let Ok(raw) = std::env::var("STREAMCHAT_CONNECT_TIMEOUT") {
            match raw.parse() {
                Ok(secs) => config = config.with_connect_timeout_secs(secs),
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid STREAMCHAT_CONNECT_TIMEOUT"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.stream_path, "/api/chat");
        assert_eq!(config.workspace_path, ".");
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::new()
            .with_base_url("http://example.com")
            .with_stream_path("v1/stream")
            .with_workspace_path("/tmp/ws")
            .with_connect_timeout_secs(3);

        assert_eq!(config.stream_url(), "http://example.com/v1/stream");
        assert_eq!(config.workspace_path, "/tmp/ws");
        assert_eq!(config.connect_timeout_secs, 3);
    }

    #[test]
    fn test_stream_url_slashes() {
        let config = ClientConfig::new().with_base_url("http://h:1//");
        assert_eq!(config.stream_url(), "http://h:1/api/chat");

        let config = ClientConfig::new().with_stream_path("chat");
        assert_eq!(config.stream_url(), "http://localhost:8000/chat");
    }
}
