//! Runtime configuration loaded from the environment
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: HTTP timeout for outbound requests
//! - 1.0.0: Initial implementation (token, dev guild, log level, source URL, presence file)

use anyhow::{anyhow, Context as _, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_SOURCE_URL: &str = "https://github.com/isabelroses/blahaj";
pub const DEFAULT_PRESENCE_CONFIG_PATH: &str = "presence.yaml";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Development guild; when set, commands are registered there instead of globally
    pub discord_guild_id: Option<u64>,
    pub log_level: String,
    pub source_url: String,
    pub presence_config_path: PathBuf,
    /// Timeout for outbound HTTP requests such as code link fetches
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| anyhow!("DISCORD_TOKEN must be set"))?;

        let discord_guild_id = match lookup("DISCORD_GUILD_ID").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("DISCORD_GUILD_ID is not a valid id: {raw}"))?,
            ),
            None => None,
        };

        let http_timeout_secs = match lookup("HTTP_TIMEOUT_SECS").filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| anyhow!("HTTP_TIMEOUT_SECS must be a positive number: {raw}"))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            discord_token,
            discord_guild_id,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            source_url: lookup("SOURCE_URL").unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            presence_config_path: lookup("PRESENCE_CONFIG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PRESENCE_CONFIG_PATH)),
            http_timeout_secs,
        })
    }
}
