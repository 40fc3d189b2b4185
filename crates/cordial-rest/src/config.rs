//! REST configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://discord.com/api/v10";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!(
        "DiscordBot (https://github.com/ynishi/cordial, {})",
        env!("CARGO_PKG_VERSION")
    )
}

fn default_timeout_secs() -> u64 {
    30
}

/// Configuration for the HTTP REST client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Bot token; prefixed with `Bot ` unless it already carries a scheme
    pub token: String,
    /// API base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RestConfig {
    /// Create a new REST configuration with just a token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Value of the `Authorization` header
    pub fn authorization(&self) -> String {
        if self.token.starts_with("Bot ") || self.token.starts_with("Bearer ") {
            self.token.clone()
        } else {
            format!("Bot {}", self.token)
        }
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = RestConfig::new("test-token")
            .with_base_url("http://localhost:8080/api/")
            .with_user_agent("cordial-test")
            .with_timeout_secs(5);

        assert_eq!(config.token, "test-token");
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.user_agent, "cordial-test");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_authorization_prefix() {
        assert_eq!(RestConfig::new("abc").authorization(), "Bot abc");
        assert_eq!(RestConfig::new("Bot abc").authorization(), "Bot abc");
        assert_eq!(RestConfig::new("Bearer xyz").authorization(), "Bearer xyz");
    }

    #[test]
    fn test_url_join() {
        let config = RestConfig::new("t");
        assert_eq!(
            config.url("/channels/9/pins/1"),
            "https://discord.com/api/v10/channels/9/pins/1"
        );
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: RestConfig = serde_json::from_value(serde_json::json!({ "token": "t" })).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("DiscordBot"));
    }
}
