//! CLI Configuration
//!
//! Loads defaults from environment variables (a `.env` file is read first by
//! `main`). Every value is optional; command-line arguments take precedence.

use std::env;

use gp_common::invite::{DEFAULT_SCOPES, OAUTH_AUTHORIZE_URL};

use crate::logging::LogFormat;

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Application ID used when `invite` is given `-` as the client ID
    pub client_id: Option<String>,

    /// Guild preselected in invite URLs when `--guild-id` is not passed
    pub guild_id: Option<String>,

    /// OAuth2 scopes requested when `--scope` is not passed
    pub scopes: Vec<String>,

    /// OAuth2 authorize endpoint
    pub oauth_base_url: String,

    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: None,
            guild_id: None,
            scopes: DEFAULT_SCOPES.iter().map(|s| (*s).to_owned()).collect(),
            oauth_base_url: OAUTH_AUTHORIZE_URL.to_owned(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GUILDPERM_CLIENT_ID`: default application ID
    /// - `GUILDPERM_GUILD_ID`: default guild ID
    /// - `GUILDPERM_SCOPES`: comma-separated scopes (default: "bot,applications.commands")
    /// - `GUILDPERM_OAUTH_BASE`: authorize endpoint (default: Discord's)
    /// - `GUILDPERM_LOG_FORMAT`: "compact", "pretty" or "json" (default: compact)
    ///
    /// Blank values count as unset. Unparseable log formats fall back to the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(val) = non_blank("GUILDPERM_CLIENT_ID") {
            config.client_id = Some(val);
        }
        if let Some(val) = non_blank("GUILDPERM_GUILD_ID") {
            config.guild_id = Some(val);
        }
        if let Some(val) = non_blank("GUILDPERM_SCOPES") {
            let scopes = parse_scopes(&val);
            if !scopes.is_empty() {
                config.scopes = scopes;
            }
        }
        if let Some(val) = non_blank("GUILDPERM_OAUTH_BASE") {
            config.oauth_base_url = val;
        }
        if let Some(val) = non_blank("GUILDPERM_LOG_FORMAT") {
            config.log_format = val.parse().unwrap_or_default();
        }

        config
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            client_id: Some("123456789".into()),
            guild_id: None,
            ..Self::default()
        }
    }
}

fn non_blank(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses scopes from "a,b,c" format, dropping empty entries.
fn parse_scopes(val: &str) -> Vec<String> {
    val.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
