//! Predefined permission sets for common kinds of bot.

use serde::Serialize;

use super::flags::Permissions;
use crate::error::Error;

impl Permissions {
    /// Read and reply in text channels.
    pub const ESSENTIAL: Self = Self::VIEW_CHANNELS
        .union(Self::SEND_MESSAGES)
        .union(Self::READ_MESSAGE_HISTORY)
        .union(Self::EMBED_LINKS)
        .union(Self::USE_EXTERNAL_EMOJIS)
        .union(Self::ADD_REACTIONS)
        .union(Self::USE_SLASH_COMMANDS);

    /// Essential plus file uploads and thread replies.
    pub const UTILITY: Self = Self::ESSENTIAL
        .union(Self::ATTACH_FILES)
        .union(Self::SEND_MESSAGES_IN_THREADS);

    /// Moderation bot: message cleanup, kicks, bans, timeouts and role assignment.
    pub const MODERATION_BOT: Self = Self::VIEW_CHANNELS
        .union(Self::SEND_MESSAGES)
        .union(Self::READ_MESSAGE_HISTORY)
        .union(Self::EMBED_LINKS)
        .union(Self::MANAGE_MESSAGES)
        .union(Self::KICK_MEMBERS)
        .union(Self::BAN_MEMBERS)
        .union(Self::TIMEOUT_MEMBERS)
        .union(Self::MANAGE_ROLES)
        .union(Self::MANAGE_NICKNAMES)
        .union(Self::VIEW_AUDIT_LOG)
        .union(Self::USE_SLASH_COMMANDS);

    /// Music bot: voice playback plus a text channel for the queue.
    pub const MUSIC: Self = Self::VIEW_CHANNELS
        .union(Self::SEND_MESSAGES)
        .union(Self::CONNECT)
        .union(Self::SPEAK)
        .union(Self::USE_VOICE_ACTIVITY)
        .union(Self::EMBED_LINKS)
        .union(Self::ADD_REACTIONS)
        .union(Self::USE_SLASH_COMMANDS)
        .union(Self::PRIORITY_SPEAKER);

    /// Server management without `ADMINISTRATOR`.
    pub const ADMIN: Self = Self::VIEW_CHANNELS
        .union(Self::SEND_MESSAGES)
        .union(Self::READ_MESSAGE_HISTORY)
        .union(Self::EMBED_LINKS)
        .union(Self::MANAGE_SERVER)
        .union(Self::MANAGE_CHANNELS)
        .union(Self::MANAGE_ROLES)
        .union(Self::MANAGE_MESSAGES)
        .union(Self::KICK_MEMBERS)
        .union(Self::BAN_MEMBERS)
        .union(Self::VIEW_AUDIT_LOG)
        .union(Self::USE_SLASH_COMMANDS);
}

/// A named permission set that can be passed instead of flag names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Essential,
    Utility,
    Moderation,
    Music,
    Admin,
}

impl Preset {
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Essential,
            Self::Utility,
            Self::Moderation,
            Self::Music,
            Self::Admin,
        ]
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Utility => "utility",
            Self::Moderation => "moderation",
            Self::Music => "music",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub const fn permissions(&self) -> Permissions {
        match self {
            Self::Essential => Permissions::ESSENTIAL,
            Self::Utility => Permissions::UTILITY,
            Self::Moderation => Permissions::MODERATION_BOT,
            Self::Music => Permissions::MUSIC,
            Self::Admin => Permissions::ADMIN,
        }
    }

    /// Flag names in the preset, in bit order.
    #[must_use]
    pub fn flag_names(&self) -> Vec<&'static str> {
        self.permissions().names()
    }

    /// Case-insensitive lookup by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::str::FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownPreset(s.to_owned()))
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
