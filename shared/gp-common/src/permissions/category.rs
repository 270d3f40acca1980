//! Display categories for permission flags.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::flags::Permissions;

/// Display grouping of a permission flag.
///
/// Variant order is the presentation order; `Ord` follows it, so a
/// `BTreeMap<Category, _>` iterates General, Text, Voice, Special, Other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Server administration and membership management
    General,
    /// Text channels, threads and messages
    Text,
    /// Voice and stage channels
    Voice,
    /// Guild expression management
    Special,
    /// Flags with no display grouping
    Other,
}

impl Category {
    /// All categories in presentation order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::General,
            Self::Text,
            Self::Voice,
            Self::Special,
            Self::Other,
        ]
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Text => "Text",
            Self::Voice => "Voice",
            Self::Special => "Special",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Group a permission set by category.
///
/// Categories with no set flags are omitted. Inside a category, names keep
/// bit order.
#[must_use]
pub fn categorize(permissions: Permissions) -> BTreeMap<Category, Vec<&'static str>> {
    let mut grouped: BTreeMap<Category, Vec<&'static str>> = BTreeMap::new();
    for flag in permissions.flags() {
        grouped.entry(flag.category).or_default().push(flag.name);
    }
    grouped
}
