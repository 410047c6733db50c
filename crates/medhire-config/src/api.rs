//! Backend API connection settings.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("medhire/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to (no trailing slash needed).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Base URL without trailing slashes, ready for `format!("{base}{path}")`.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Whether the base URL uses a scheme reqwest can talk to.
    #[must_use]
    pub fn has_valid_scheme(&self) -> bool {
        self.base_url.starts_with("http://") || self.base_url.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("medhire/"));
    }

    #[test]
    fn normalized_base_url_strips_trailing_slashes() {
        let config = ApiConfig {
            base_url: "https://api.example.com/v1//".into(),
            ..Default::default()
        };
        assert_eq!(config.normalized_base_url(), "https://api.example.com/v1");
    }

    #[test]
    fn rejects_non_http_schemes() {
        let config = ApiConfig {
            base_url: "ftp://api.example.com".into(),
            ..Default::default()
        };
        assert!(!config.has_valid_scheme());
        assert!(ApiConfig::default().has_valid_scheme());
    }
}
