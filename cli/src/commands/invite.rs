//! `invite` command.

use std::io::Write;

use anyhow::{bail, Result};
use serde::Serialize;

use gp_common::permissions::{encode, parse_mask, Preset};
use gp_common::{InviteBuilder, InviteError};

use crate::config::Config;

/// Client ID placeholder meaning "use `GUILDPERM_CLIENT_ID`".
const CLIENT_ID_FROM_ENV: &str = "-";

/// Raw `invite` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteRequest {
    pub client_id: String,
    pub permissions: Vec<String>,
    pub guild_id: Option<String>,
    pub scopes: Vec<String>,
}

/// How the permission tokens were interpreted. The first token decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionSource {
    Integer(u128),
    Preset(Preset),
    Names(Vec<String>),
}

impl PermissionSource {
    pub fn from_tokens(tokens: &[String]) -> Result<Self> {
        let Some(first) = tokens.first() else {
            bail!("At least one permission integer, preset or name is required");
        };

        let source = if !first.is_empty() && first.bytes().all(|b| b.is_ascii_digit()) {
            Self::Integer(parse_mask(first)?)
        } else if let Some(preset) = Preset::from_name(first) {
            Self::Preset(preset)
        } else {
            return Ok(Self::Names(tokens.to_vec()));
        };

        if tokens.len() > 1 {
            tracing::warn!(
                ignored = ?&tokens[1..],
                "Extra arguments after a permission integer or preset are ignored"
            );
        }
        Ok(source)
    }

    /// Resolve to a permission integer plus any unrecognized names.
    pub fn resolve(self) -> Result<(u128, Vec<String>)> {
        match self {
            Self::Integer(mask) => Ok((mask, Vec::new())),
            Self::Preset(preset) => Ok((u128::from(preset.permissions().bits()), Vec::new())),
            Self::Names(names) => {
                let encoded = encode(&names).require_any()?;
                Ok((u128::from(encoded.bits()), encoded.skipped))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InviteOutput {
    pub url: String,
    pub permissions: u128,
    pub skipped: Vec<String>,
}

/// Build the URL for a request, filling gaps from `config`.
///
/// The client ID is checked before the permission tokens are interpreted.
pub fn build(request: InviteRequest, config: &Config) -> Result<InviteOutput> {
    let client_id = resolve_client_id(&request.client_id, config)?;
    let source = PermissionSource::from_tokens(&request.permissions)?;
    build_from_source(&client_id, source, request.guild_id, request.scopes, config)
}

/// Build the URL from an already interpreted permission source.
///
/// `guild_id` falls back to the configured guild, and empty `scopes` fall
/// back to the configured scopes.
pub fn build_from_source(
    client_id: &str,
    source: PermissionSource,
    guild_id: Option<String>,
    scopes: Vec<String>,
    config: &Config,
) -> Result<InviteOutput> {
    tracing::debug!(?source, "Resolved permission mode");
    let (permissions, skipped) = source.resolve()?;

    let guild_id = guild_id.or_else(|| config.guild_id.clone());
    let scopes = if scopes.is_empty() {
        config.scopes.clone()
    } else {
        scopes
    };

    let url = InviteBuilder::new(client_id)
        .base_url(config.oauth_base_url.as_str())
        .permissions(permissions)
        .guild_id(guild_id)
        .scopes(scopes)
        .build()?;

    Ok(InviteOutput {
        url,
        permissions,
        skipped,
    })
}

fn resolve_client_id(raw: &str, config: &Config) -> Result<String> {
    let client_id = raw.trim();
    if client_id == CLIENT_ID_FROM_ENV {
        return match &config.client_id {
            Some(id) => Ok(id.clone()),
            None => bail!("Client ID '-' given but GUILDPERM_CLIENT_ID is not set"),
        };
    }
    if client_id.is_empty() {
        return Err(InviteError::EmptyClientId.into());
    }
    Ok(client_id.to_owned())
}

/// Run `invite`.
pub fn run<W: Write>(request: InviteRequest, config: &Config, json: bool, out: &mut W) -> Result<()> {
    let output = build(request, config)?;
    emit(&output, json, out)
}

/// Print a built invite: the bare URL, or JSON.
pub fn emit<W: Write>(output: &InviteOutput, json: bool, out: &mut W) -> Result<()> {
    tracing::info!(permissions = %output.permissions, "Generated invite link");

    if json {
        super::write_json(out, output)
    } else {
        writeln!(out, "{}", output.url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn request(client_id: &str, permissions: &[&str]) -> InviteRequest {
        InviteRequest {
            client_id: client_id.into(),
            permissions: tokens(permissions),
            guild_id: None,
            scopes: Vec::new(),
        }
    }

    #[test]
    fn test_source_integer() {
        assert_eq!(
            PermissionSource::from_tokens(&tokens(&["2048"])).unwrap(),
            PermissionSource::Integer(2048)
        );
    }

    #[test]
    fn test_source_preset_ignores_extras() {
        assert_eq!(
            PermissionSource::from_tokens(&tokens(&["Moderation", "send_messages"])).unwrap(),
            PermissionSource::Preset(Preset::Moderation)
        );
    }

    #[test]
    fn test_source_names() {
        assert_eq!(
            PermissionSource::from_tokens(&tokens(&["send_messages", "speak"])).unwrap(),
            PermissionSource::Names(tokens(&["send_messages", "speak"]))
        );
    }

    #[test]
    fn test_source_integer_overflow() {
        let huge = "9".repeat(60);
        assert!(PermissionSource::from_tokens(&[huge]).is_err());
    }

    #[test]
    fn test_resolve_names_skips_unknown() {
        let (bits, skipped) = PermissionSource::Names(tokens(&["send_messages", "bogus"]))
            .resolve()
            .unwrap();
        assert_eq!(bits, 2048);
        assert_eq!(skipped, vec!["bogus"]);
    }

    #[test]
    fn test_resolve_all_unknown_fails() {
        let err = PermissionSource::Names(tokens(&["bogus", "nope"]))
            .resolve()
            .unwrap_err();
        assert!(err.to_string().contains("bogus, nope"));
    }

    #[test]
    fn test_build_with_integer() {
        let output = build(request("123", &["2048"]), &Config::default()).unwrap();
        assert_eq!(
            output.url,
            "https://discord.com/api/oauth2/authorize?client_id=123&permissions=2048&scope=bot%20applications.commands"
        );
        assert!(output.skipped.is_empty());
    }

    #[test]
    fn test_build_with_preset() {
        let output = build(request("123", &["essential"]), &Config::default()).unwrap();
        assert_eq!(output.permissions, 2_147_830_848);
        assert!(output.url.contains("permissions=2147830848"));
    }

    #[test]
    fn test_build_uses_config_client_and_guild() {
        let config = Config {
            guild_id: Some("777".into()),
            ..Config::default_for_test()
        };
        let output = build(request("-", &["8"]), &config).unwrap();
        assert!(output.url.contains("client_id=123456789&permissions=8"));
        assert!(output.url.ends_with("&guild_id=777"));
    }

    #[test]
    fn test_build_dash_without_config_fails() {
        let err = build(request("-", &["8"]), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("GUILDPERM_CLIENT_ID"));
    }

    #[test]
    fn test_build_explicit_arguments_win() {
        let config = Config {
            guild_id: Some("777".into()),
            ..Config::default_for_test()
        };
        let req = InviteRequest {
            guild_id: Some("555".into()),
            scopes: tokens(&["bot"]),
            ..request("42", &["2048"])
        };
        let output = build(req, &config).unwrap();
        assert_eq!(
            output.url,
            "https://discord.com/api/oauth2/authorize?client_id=42&permissions=2048&scope=bot&guild_id=555"
        );
    }

    #[test]
    fn test_build_empty_client_id_fails() {
        let err = build(request("  ", &["2048"]), &Config::default()).unwrap_err();
        assert_eq!(err.to_string(), "Client ID is required");
    }

    #[test]
    fn test_build_empty_client_id_checked_before_names() {
        let err = build(request("", &["bogus"]), &Config::default()).unwrap_err();
        assert_eq!(err.to_string(), "Client ID is required");
    }

    #[test]
    fn test_build_from_source_skips_token_rules() {
        // a numeric-looking name stays a name when the source is given directly
        let err = build_from_source(
            "1",
            PermissionSource::Names(tokens(&["2048"])),
            None,
            Vec::new(),
            &Config::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("2048"));
    }

    #[test]
    fn test_run_json() {
        let mut buf = Vec::new();
        run(request("123", &["send_messages", "bogus"]), &Config::default(), true, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["permissions"], 2048);
        assert_eq!(value["skipped"][0], "bogus");
    }
}
