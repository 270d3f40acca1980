//! OAuth2 bot invite URL construction.
//!
//! Builds `https://discord.com/api/oauth2/authorize?client_id=...` links.
//! No network access and no validation of IDs beyond "not empty".

use crate::error::InviteError;

/// Discord's OAuth2 authorization endpoint.
pub const OAUTH_AUTHORIZE_URL: &str = "https://discord.com/api/oauth2/authorize";

/// Scopes requested when none are given.
pub const DEFAULT_SCOPES: &[&str] = &["bot", "applications.commands"];

/// Builder for an invite URL.
///
/// # Examples
///
/// ```
/// use gp_common::InviteBuilder;
///
/// let url = InviteBuilder::new("123").permissions(2048).build().unwrap();
/// assert_eq!(
///     url,
///     "https://discord.com/api/oauth2/authorize?client_id=123&permissions=2048&scope=bot%20applications.commands"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteBuilder {
    base_url: String,
    client_id: String,
    permissions: u128,
    guild_id: Option<String>,
    scopes: Vec<String>,
}

impl InviteBuilder {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            base_url: OAUTH_AUTHORIZE_URL.to_owned(),
            client_id: client_id.into(),
            permissions: 0,
            guild_id: None,
            scopes: DEFAULT_SCOPES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// Override the authorize endpoint.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Permission integer to request. Emitted verbatim, unknown bits included.
    #[must_use]
    pub const fn permissions(mut self, permissions: u128) -> Self {
        self.permissions = permissions;
        self
    }

    /// Preselect a guild. Empty strings are treated as absent.
    #[must_use]
    pub fn guild_id<S: Into<String>>(mut self, guild_id: Option<S>) -> Self {
        self.guild_id = guild_id.map(Into::into).filter(|id| !id.trim().is_empty());
        self
    }

    /// Replace the requested scopes.
    #[must_use]
    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Build the URL.
    ///
    /// Query parameter order is `client_id`, `permissions`, `scope`, then
    /// `guild_id` when set. Values are percent-encoded, so the space between
    /// scopes becomes `%20`.
    pub fn build(&self) -> Result<String, InviteError> {
        let client_id = self.client_id.trim();
        if client_id.is_empty() {
            return Err(InviteError::EmptyClientId);
        }

        let scope = self.scopes.join(" ");
        let mut url = format!(
            "{}?client_id={}&permissions={}&scope={}",
            self.base_url,
            urlencoding::encode(client_id),
            self.permissions,
            urlencoding::encode(&scope),
        );
        if let Some(guild_id) = &self.guild_id {
            url.push_str("&guild_id=");
            url.push_str(&urlencoding::encode(guild_id.trim()));
        }

        tracing::debug!(client_id, permissions = %self.permissions, "Built invite URL");
        Ok(url)
    }
}

/// One-shot form of [`InviteBuilder`].
///
/// An empty `scopes` slice requests no scopes; pass [`DEFAULT_SCOPES`] for the
/// usual bot + slash command pair.
pub fn build_invite_url(
    client_id: &str,
    permissions: u128,
    guild_id: Option<&str>,
    scopes: &[&str],
) -> Result<String, InviteError> {
    InviteBuilder::new(client_id)
        .permissions(permissions)
        .guild_id(guild_id)
        .scopes(scopes.iter().copied())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_invite() {
        let url = build_invite_url("123", 2048, None, DEFAULT_SCOPES).unwrap();
        assert!(url.starts_with("https://discord.com/api/oauth2/authorize?"));
        assert!(url.contains("client_id=123&permissions=2048&scope=bot%20applications.commands"));
        assert!(!url.contains("guild_id"));
    }

    #[test]
    fn test_empty_client_id_is_rejected() {
        assert_eq!(
            build_invite_url("", 2048, None, DEFAULT_SCOPES),
            Err(InviteError::EmptyClientId)
        );
        assert_eq!(
            build_invite_url("   ", 2048, None, DEFAULT_SCOPES),
            Err(InviteError::EmptyClientId)
        );
    }

    #[test]
    fn test_guild_id_is_appended_last() {
        let url = build_invite_url("123", 8, Some("987654321"), DEFAULT_SCOPES).unwrap();
        assert!(url.ends_with("&scope=bot%20applications.commands&guild_id=987654321"));
    }

    #[test]
    fn test_blank_guild_id_is_ignored() {
        let url = build_invite_url("123", 8, Some(""), DEFAULT_SCOPES).unwrap();
        assert!(!url.contains("guild_id"));
    }

    #[test]
    fn test_custom_scopes() {
        let url = build_invite_url("123", 0, None, &["bot"]).unwrap();
        assert!(url.ends_with("permissions=0&scope=bot"));
    }

    #[test]
    fn test_no_scopes() {
        let url = build_invite_url("123", 0, None, &[]).unwrap();
        assert!(url.ends_with("&scope="));
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let url = InviteBuilder::new("a&b=c").build().unwrap();
        assert!(url.contains("client_id=a%26b%3Dc&"));
    }

    #[test]
    fn test_permissions_are_not_masked() {
        let big = (1u128 << 47) | 2048;
        let url = InviteBuilder::new("1").permissions(big).build().unwrap();
        assert!(url.contains(&format!("permissions={big}&")));
    }

    #[test]
    fn test_custom_base_url() {
        let url = InviteBuilder::new("1")
            .base_url("https://example.test/authorize")
            .build()
            .unwrap();
        assert!(url.starts_with("https://example.test/authorize?client_id=1&"));
    }

    #[test]
    fn test_client_id_is_trimmed() {
        let url = InviteBuilder::new(" 42 ").build().unwrap();
        assert!(url.contains("client_id=42&"));
    }
}
