//! Client configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_timeout() -> u64 {
    10
}

/// Where the backend lives and how to reach it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Version prefix joined between the base URL and every path.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth_password: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            timeout_secs: default_timeout(),
            basic_auth_user: None,
            basic_auth_password: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Use HTTP basic auth when no session token is present.
    pub fn with_basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth_user = Some(user.into());
        self.basic_auth_password = Some(password.into());
        self
    }

    /// Full URL for an API path.
    ///
    /// Absolute URLs pass through untouched.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        let path = path.trim_start_matches('/');
        if prefix.is_empty() {
            format!("{base}/{path}")
        } else {
            format!("{base}/{prefix}/{path}")
        }
    }
}
