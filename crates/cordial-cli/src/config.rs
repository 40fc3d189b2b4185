//! Configuration management for Cordial CLI
//!
//! Stores the bot token and API settings in ~/.config/cordial/config.toml

use anyhow::{Context, Result};
use cordial_rest::RestConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR: &str = "cordial";
const CONFIG_FILE: &str = "config.toml";

/// Environment variables checked for a token, in order
const TOKEN_ENV_VARS: [&str; 2] = ["CORDIAL_TOKEN", "DISCORD_TOKEN"];

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    cordial_rest::RestConfig::default().base_url
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Token from the environment (via `lookup`), falling back to the stored one
    fn resolve_token_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        TOKEN_ENV_VARS
            .iter()
            .find_map(|var| lookup(var).filter(|v| !v.is_empty()))
            .or_else(|| self.token.clone())
    }

    /// Build the REST configuration, requiring a token
    pub fn rest_config(&self) -> Result<RestConfig> {
        self.rest_config_with(|var| std::env::var(var).ok())
    }

    fn rest_config_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<RestConfig> {
        let token = self
            .resolve_token_with(lookup)
            .context("No token configured. Run 'cordial login' or set CORDIAL_TOKEN.")?;

        let mut rest = RestConfig::new(token).with_base_url(&self.base_url);
        if let Some(timeout) = self.timeout_secs {
            rest = rest.with_timeout_secs(timeout);
        }
        Ok(rest)
    }

    /// Token with everything but the last four characters hidden
    pub fn masked_token(&self) -> Option<String> {
        self.token.as_ref().map(|t| {
            let visible: String = t
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("****{visible}")
        })
    }
}
