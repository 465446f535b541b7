//! Client configuration.
//!
//! Settings come from the environment with local defaults:
//!
//! - `SUPEREGO_API_BASE_URL`: backend base URL (default `http://localhost:8000/api`)
//! - `SUPEREGO_DATA_DIR`: durable store directory (default `~/.superego`)

use std::path::PathBuf;

/// Backend base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "SUPEREGO_API_BASE_URL";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SUPEREGO_DATA_DIR";

const DATA_DIR_NAME: &str = ".superego";

/// Configuration for a [`ClientContext`](crate::context::ClientContext).
///
/// # Example
///
/// ```ignore
/// use superego::config::ClientConfig;
///
/// let config = ClientConfig::from_env().with_base_url("http://127.0.0.1:9000/api");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub base_url: String,
    /// Directory holding the durable store
    pub data_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: default_data_dir(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. A trailing `/` is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Defaults overridden by `SUPEREGO_API_BASE_URL` and `SUPEREGO_DATA_DIR`.
    /// Empty values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = non_empty_env(BASE_URL_ENV) {
            config = config.with_base_url(url);
        }
        if let Some(dir) = non_empty_env(DATA_DIR_ENV) {
            config = config.with_data_dir(dir);
        }
        config
    }

    /// `POST` endpoint for API key submission.
    pub fn key_set_url(&self) -> String {
        format!("{}/key/set", self.base_url)
    }

    /// `GET` endpoint for the provider → models directory.
    pub fn models_url(&self) -> String {
        format!("{}/models", self.base_url)
    }

    /// `GET` endpoint for one thread's latest state.
    pub fn thread_state_url(&self, thread_id: &str) -> String {
        format!(
            "{}/threads/{}/state",
            self.base_url,
            urlencoding::encode(thread_id)
        )
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_base_url() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.data_dir.ends_with(DATA_DIR_NAME));
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let config = ClientConfig::new().with_base_url("http://example.com/api/");
        assert_eq!(config.base_url, "http://example.com/api");
        assert_eq!(config.key_set_url(), "http://example.com/api/key/set");
    }

    #[test]
    fn test_endpoint_urls() {
        let config = ClientConfig::new();
        assert_eq!(config.models_url(), "http://localhost:8000/api/models");
        assert_eq!(
            config.thread_state_url("t-1"),
            "http://localhost:8000/api/threads/t-1/state"
        );
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        std::env::set_var(BASE_URL_ENV, "http://10.0.0.2:9000/api/");
        std::env::set_var(DATA_DIR_ENV, "/tmp/superego-test");
        let config = ClientConfig::from_env();
        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(DATA_DIR_ENV);

        assert_eq!(config.base_url, "http://10.0.0.2:9000/api");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/superego-test"));
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_empty() {
        std::env::set_var(BASE_URL_ENV, "  ");
        let config = ClientConfig::from_env();
        std::env::remove_var(BASE_URL_ENV);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
