//! Discord permission flags using bitflags.
//!
//! Bit positions follow the Discord API. Every flag also has a row in
//! [`PERMISSION_FLAGS`], which carries its stable snake_case name and its
//! display category. The table is the single source for name lookups,
//! iteration order and categorization.

use std::collections::{HashMap, HashSet};

use bitflags::bitflags;
use lazy_static::lazy_static;

use super::category::Category;
use crate::error::TableError;

bitflags! {
    /// Discord permissions represented as a 64-bit bitfield.
    ///
    /// Bits that Discord defines but this table does not are dropped by
    /// [`Permissions::from_bits_truncate`], which is how decoding treats them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct Permissions: u64 {
        // === Membership & Server (bits 0-5) ===
        /// Create invite links to the server
        const CREATE_INSTANT_INVITE       = 1 << 0;
        /// Remove members from the server
        const KICK_MEMBERS                = 1 << 1;
        /// Permanently ban members from the server
        const BAN_MEMBERS                 = 1 << 2;
        /// Grants every permission and bypasses channel overwrites.
        const ADMINISTRATOR               = 1 << 3;
        /// Create, edit and delete channels
        const MANAGE_CHANNELS             = 1 << 4;
        /// Change server name, region and other settings
        const MANAGE_SERVER               = 1 << 5;

        // === Reactions, Audit & Voice Priority (bits 6-9) ===
        /// Add new reactions to messages
        const ADD_REACTIONS               = 1 << 6;
        /// Read the server audit log
        const VIEW_AUDIT_LOG              = 1 << 7;
        /// Be heard over other speakers in voice channels
        const PRIORITY_SPEAKER            = 1 << 8;
        /// Go live or share video in voice channels
        const STREAM                      = 1 << 9;

        // === Text Channels (bits 10-18) ===
        /// See channels and read their messages
        const VIEW_CHANNELS               = 1 << 10;
        /// Send messages in text channels
        const SEND_MESSAGES               = 1 << 11;
        /// Send text-to-speech messages
        const SEND_TTS_MESSAGES           = 1 << 12;
        /// Delete or pin messages from other members
        const MANAGE_MESSAGES             = 1 << 13;
        /// Links posted get an embedded preview
        const EMBED_LINKS                 = 1 << 14;
        /// Upload files and images
        const ATTACH_FILES                = 1 << 15;
        /// Read messages sent before joining the channel
        const READ_MESSAGE_HISTORY        = 1 << 16;
        /// Mention @everyone, @here and all roles
        const MENTION_EVERYONE            = 1 << 17;
        /// Use emoji from other servers
        const USE_EXTERNAL_EMOJIS         = 1 << 18;

        // === Insights (bit 19) ===
        /// View server analytics
        const VIEW_SERVER_INSIGHTS        = 1 << 19;

        // === Voice Channels (bits 20-25) ===
        /// Join voice channels
        const CONNECT                     = 1 << 20;
        /// Talk in voice channels
        const SPEAK                       = 1 << 21;
        /// Server-mute other members in voice channels
        const MUTE_MEMBERS                = 1 << 22;
        /// Server-deafen other members in voice channels
        const DEAFEN_MEMBERS              = 1 << 23;
        /// Move members between voice channels
        const MOVE_MEMBERS                = 1 << 24;
        /// Talk without push-to-talk
        const USE_VOICE_ACTIVITY          = 1 << 25;

        // === Members, Roles & Integrations (bits 26-31) ===
        /// Change own nickname
        const CHANGE_NICKNAME             = 1 << 26;
        /// Change other members' nicknames
        const MANAGE_NICKNAMES            = 1 << 27;
        /// Create, edit and assign roles below the bot's own
        const MANAGE_ROLES                = 1 << 28;
        /// Create, edit and delete webhooks
        const MANAGE_WEBHOOKS             = 1 << 29;
        /// Edit and delete custom emoji and stickers
        const MANAGE_EMOJIS_AND_STICKERS  = 1 << 30;
        /// Discord calls this `USE_APPLICATION_COMMANDS`.
        const USE_SLASH_COMMANDS          = 1 << 31;

        // === Stage, Events & Threads (bits 32-38) ===
        /// Ask to speak in stage channels
        const REQUEST_TO_SPEAK            = 1 << 32;
        /// Edit and cancel scheduled events
        const MANAGE_EVENTS               = 1 << 33;
        /// Rename, archive and delete threads
        const MANAGE_THREADS              = 1 << 34;
        /// Start public threads
        const CREATE_PUBLIC_THREADS       = 1 << 35;
        /// Start private threads
        const CREATE_PRIVATE_THREADS      = 1 << 36;
        /// Use stickers from other servers
        const USE_EXTERNAL_STICKERS       = 1 << 37;
        /// Reply inside threads
        const SEND_MESSAGES_IN_THREADS    = 1 << 38;

        // === Activities & Moderation (bits 39-41) ===
        /// Launch activities in voice channels
        const USE_EMBEDDED_ACTIVITIES     = 1 << 39;
        /// Discord calls this `MODERATE_MEMBERS`.
        const TIMEOUT_MEMBERS             = 1 << 40;
        /// View role subscription revenue analytics
        const VIEW_CREATOR_MONETIZATION_ANALYTICS = 1 << 41;

        // === Expressions & Sounds (bits 42-46) ===
        /// Play soundboard sounds in voice channels
        const USE_SOUNDBOARD              = 1 << 42;
        /// Upload custom emoji, stickers and sounds
        const CREATE_EXPRESSIONS          = 1 << 43;
        /// Create scheduled events
        const CREATE_EVENTS               = 1 << 44;
        /// Play soundboard sounds from other servers
        const USE_EXTERNAL_SOUNDS         = 1 << 45;
        /// Send voice messages
        const SEND_VOICE_MESSAGES         = 1 << 46;

        // === Recent Additions (bits 48-50; 47 is unassigned) ===
        /// Set the status line of a voice channel
        const SET_VOICE_CHANNEL_STATUS    = 1 << 48;
        /// Create polls
        const SEND_POLLS                  = 1 << 49;
        /// Let user-installed apps post public replies
        const USE_EXTERNAL_APPS           = 1 << 50;
    }
}

/// One row of the permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PermissionFlag {
    /// Stable snake_case identifier, e.g. `manage_messages`.
    pub name: &'static str,
    /// The single bit this flag occupies.
    #[serde(rename = "bit_value", serialize_with = "serialize_bits")]
    pub permission: Permissions,
    /// Display grouping.
    pub category: Category,
}

impl PermissionFlag {
    const fn new(name: &'static str, permission: Permissions, category: Category) -> Self {
        Self {
            name,
            permission,
            category,
        }
    }

    /// Numeric value of the flag's bit.
    #[must_use]
    pub const fn bit_value(&self) -> u64 {
        self.permission.bits()
    }

    /// Human-readable name, e.g. `Manage Messages`.
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(self.name)
    }
}

fn serialize_bits<S: serde::Serializer>(perm: &Permissions, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(perm.bits())
}

/// Every known permission, in bit order.
pub const PERMISSION_FLAGS: &[PermissionFlag] = &[
    PermissionFlag::new("create_instant_invite", Permissions::CREATE_INSTANT_INVITE, Category::General),
    PermissionFlag::new("kick_members", Permissions::KICK_MEMBERS, Category::General),
    PermissionFlag::new("ban_members", Permissions::BAN_MEMBERS, Category::General),
    PermissionFlag::new("administrator", Permissions::ADMINISTRATOR, Category::General),
    PermissionFlag::new("manage_channels", Permissions::MANAGE_CHANNELS, Category::General),
    PermissionFlag::new("manage_server", Permissions::MANAGE_SERVER, Category::General),
    PermissionFlag::new("add_reactions", Permissions::ADD_REACTIONS, Category::Text),
    PermissionFlag::new("view_audit_log", Permissions::VIEW_AUDIT_LOG, Category::General),
    PermissionFlag::new("priority_speaker", Permissions::PRIORITY_SPEAKER, Category::Voice),
    PermissionFlag::new("stream", Permissions::STREAM, Category::Voice),
    PermissionFlag::new("view_channels", Permissions::VIEW_CHANNELS, Category::Text),
    PermissionFlag::new("send_messages", Permissions::SEND_MESSAGES, Category::Text),
    PermissionFlag::new("send_tts_messages", Permissions::SEND_TTS_MESSAGES, Category::Text),
    PermissionFlag::new("manage_messages", Permissions::MANAGE_MESSAGES, Category::Text),
    PermissionFlag::new("embed_links", Permissions::EMBED_LINKS, Category::Text),
    PermissionFlag::new("attach_files", Permissions::ATTACH_FILES, Category::Text),
    PermissionFlag::new("read_message_history", Permissions::READ_MESSAGE_HISTORY, Category::Text),
    PermissionFlag::new("mention_everyone", Permissions::MENTION_EVERYONE, Category::Text),
    PermissionFlag::new("use_external_emojis", Permissions::USE_EXTERNAL_EMOJIS, Category::Text),
    PermissionFlag::new("view_server_insights", Permissions::VIEW_SERVER_INSIGHTS, Category::General),
    PermissionFlag::new("connect", Permissions::CONNECT, Category::Voice),
    PermissionFlag::new("speak", Permissions::SPEAK, Category::Voice),
    PermissionFlag::new("mute_members", Permissions::MUTE_MEMBERS, Category::Voice),
    PermissionFlag::new("deafen_members", Permissions::DEAFEN_MEMBERS, Category::Voice),
    PermissionFlag::new("move_members", Permissions::MOVE_MEMBERS, Category::Voice),
    PermissionFlag::new("use_voice_activity", Permissions::USE_VOICE_ACTIVITY, Category::Voice),
    PermissionFlag::new("change_nickname", Permissions::CHANGE_NICKNAME, Category::General),
    PermissionFlag::new("manage_nicknames", Permissions::MANAGE_NICKNAMES, Category::General),
    PermissionFlag::new("manage_roles", Permissions::MANAGE_ROLES, Category::General),
    PermissionFlag::new("manage_webhooks", Permissions::MANAGE_WEBHOOKS, Category::General),
    PermissionFlag::new("manage_emojis_and_stickers", Permissions::MANAGE_EMOJIS_AND_STICKERS, Category::General),
    PermissionFlag::new("use_slash_commands", Permissions::USE_SLASH_COMMANDS, Category::Text),
    PermissionFlag::new("request_to_speak", Permissions::REQUEST_TO_SPEAK, Category::Voice),
    PermissionFlag::new("manage_events", Permissions::MANAGE_EVENTS, Category::General),
    PermissionFlag::new("manage_threads", Permissions::MANAGE_THREADS, Category::Text),
    PermissionFlag::new("create_public_threads", Permissions::CREATE_PUBLIC_THREADS, Category::Text),
    PermissionFlag::new("create_private_threads", Permissions::CREATE_PRIVATE_THREADS, Category::Text),
    PermissionFlag::new("use_external_stickers", Permissions::USE_EXTERNAL_STICKERS, Category::Text),
    PermissionFlag::new("send_messages_in_threads", Permissions::SEND_MESSAGES_IN_THREADS, Category::Text),
    PermissionFlag::new("use_embedded_activities", Permissions::USE_EMBEDDED_ACTIVITIES, Category::Voice),
    PermissionFlag::new("timeout_members", Permissions::TIMEOUT_MEMBERS, Category::General),
    PermissionFlag::new("view_creator_monetization_analytics", Permissions::VIEW_CREATOR_MONETIZATION_ANALYTICS, Category::Other),
    PermissionFlag::new("use_soundboard", Permissions::USE_SOUNDBOARD, Category::Voice),
    PermissionFlag::new("create_expressions", Permissions::CREATE_EXPRESSIONS, Category::Special),
    PermissionFlag::new("create_events", Permissions::CREATE_EVENTS, Category::General),
    PermissionFlag::new("use_external_sounds", Permissions::USE_EXTERNAL_SOUNDS, Category::Voice),
    PermissionFlag::new("send_voice_messages", Permissions::SEND_VOICE_MESSAGES, Category::Text),
    PermissionFlag::new("set_voice_channel_status", Permissions::SET_VOICE_CHANNEL_STATUS, Category::Voice),
    PermissionFlag::new("send_polls", Permissions::SEND_POLLS, Category::Text),
    PermissionFlag::new("use_external_apps", Permissions::USE_EXTERNAL_APPS, Category::Special),
];

/// Compile-time check that every table row owns exactly one bit, no two rows
/// share a bit, and the rows cover every constant of [`Permissions`].
const fn table_is_consistent(table: &[PermissionFlag]) -> bool {
    let mut seen = 0u64;
    let mut i = 0;
    while i < table.len() {
        let bits = table[i].permission.bits();
        if !bits.is_power_of_two() || seen & bits != 0 {
            return false;
        }
        seen |= bits;
        i += 1;
    }
    seen == Permissions::all().bits()
}

const _: () = assert!(
    table_is_consistent(PERMISSION_FLAGS),
    "PERMISSION_FLAGS must assign each Permissions bit to exactly one row"
);

lazy_static! {
    static ref FLAGS_BY_NAME: HashMap<&'static str, &'static PermissionFlag> =
        PERMISSION_FLAGS.iter().map(|flag| (flag.name, flag)).collect();
}

/// Look up a flag by its snake_case name.
///
/// Matching is exact; `Send_Messages` is not a known name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static PermissionFlag> {
    FLAGS_BY_NAME.get(name).copied()
}

/// Re-check a permission table at runtime.
///
/// [`PERMISSION_FLAGS`] is already checked at compile time; this reports
/// *which* row is wrong and also catches duplicate names.
pub fn verify_table(table: &[PermissionFlag]) -> Result<(), TableError> {
    let mut owners: HashMap<u64, &'static str> = HashMap::with_capacity(table.len());
    let mut names: HashSet<&'static str> = HashSet::with_capacity(table.len());

    for flag in table {
        let bits = flag.bit_value();
        if bits == 0 {
            return Err(TableError::ZeroBit { name: flag.name });
        }
        if !bits.is_power_of_two() {
            return Err(TableError::NotPowerOfTwo {
                name: flag.name,
                bits,
            });
        }
        if let Some(first) = owners.insert(bits, flag.name) {
            return Err(TableError::DuplicateBit {
                first,
                second: flag.name,
                bits,
            });
        }
        if !names.insert(flag.name) {
            return Err(TableError::DuplicateName { name: flag.name });
        }
    }

    tracing::debug!(flags = table.len(), "Permission table verified");
    Ok(())
}

/// Turn a snake_case flag name into title case: `send_messages` → `Send Messages`.
#[must_use]
pub fn display_name(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Permissions {
    /// Table rows whose bit is set, in bit order.
    pub fn flags(self) -> impl Iterator<Item = &'static PermissionFlag> {
        PERMISSION_FLAGS
            .iter()
            .filter(move |flag| self.contains(flag.permission))
    }

    /// Names of the set flags, in bit order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        self.flags().map(|flag| flag.name).collect()
    }

    /// Names of the set flags, sorted by display name.
    #[must_use]
    pub fn sorted_names(self) -> Vec<&'static str> {
        let mut names = self.names();
        names.sort_by_cached_key(|name| display_name(name));
        names
    }

    /// Whether the named flag is set. Unknown names are never set.
    #[must_use]
    pub fn has_named(self, name: &str) -> bool {
        lookup(name).is_some_and(|flag| self.contains(flag.permission))
    }
}
