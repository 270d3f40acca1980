//! Risk classification and capability summary for a permission set.

use serde::Serialize;

use super::flags::Permissions;

impl Permissions {
    /// Flags that can take over or wreck a server on their own.
    pub const HIGH_RISK: Self = Self::MANAGE_SERVER
        .union(Self::MANAGE_ROLES)
        .union(Self::BAN_MEMBERS)
        .union(Self::MANAGE_WEBHOOKS);

    /// Moderation flags that are risky in combination.
    pub const MEDIUM_RISK: Self = Self::KICK_MEMBERS
        .union(Self::MANAGE_MESSAGES)
        .union(Self::MANAGE_CHANNELS)
        .union(Self::TIMEOUT_MEMBERS);

    /// Server, channel or role management.
    pub const MANAGEMENT: Self = Self::MANAGE_SERVER
        .union(Self::MANAGE_CHANNELS)
        .union(Self::MANAGE_ROLES);

    /// Member and message moderation.
    pub const MODERATION: Self = Self::KICK_MEMBERS
        .union(Self::BAN_MEMBERS)
        .union(Self::MANAGE_MESSAGES)
        .union(Self::TIMEOUT_MEMBERS);

    /// Voice channel access.
    pub const VOICE_ACCESS: Self = Self::CONNECT.union(Self::SPEAK).union(Self::MUTE_MEMBERS);
}

/// How dangerous a permission set is to grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A risk level together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub reason: &'static str,
}

/// Classify a permission set.
///
/// Rules are checked in order and the first match wins:
/// 1. `administrator` → Critical
/// 2. two or more high-risk flags → High
/// 3. one high-risk flag → Medium
/// 4. two or more medium-risk flags → Medium
/// 5. otherwise → Low
#[must_use]
pub const fn assess_risk(permissions: Permissions) -> RiskAssessment {
    if permissions.contains(Permissions::ADMINISTRATOR) {
        return RiskAssessment {
            level: RiskLevel::Critical,
            reason: "Full admin access",
        };
    }

    let high = permissions.intersection(Permissions::HIGH_RISK).bits().count_ones();
    let medium = permissions.intersection(Permissions::MEDIUM_RISK).bits().count_ones();

    if high >= 2 {
        RiskAssessment {
            level: RiskLevel::High,
            reason: "Multiple dangerous permissions",
        }
    } else if high >= 1 {
        RiskAssessment {
            level: RiskLevel::Medium,
            reason: "Some risky permissions",
        }
    } else if medium >= 2 {
        RiskAssessment {
            level: RiskLevel::Medium,
            reason: "Multiple moderation permissions",
        }
    } else {
        RiskAssessment {
            level: RiskLevel::Low,
            reason: "Safe permission set",
        }
    }
}

/// Shorthand for `assess_risk(permissions).level`.
#[must_use]
pub const fn risk_level(permissions: Permissions) -> RiskLevel {
    assess_risk(permissions).level
}

/// What a permission set lets a bot do, at a glance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    pub administrator: bool,
    pub can_manage: bool,
    pub can_moderate: bool,
    pub has_voice: bool,
}

impl Capabilities {
    /// None of management, moderation or voice.
    #[must_use]
    pub const fn is_basic(&self) -> bool {
        !self.administrator && !self.can_manage && !self.can_moderate && !self.has_voice
    }
}

#[must_use]
pub const fn summarize(permissions: Permissions) -> Capabilities {
    Capabilities {
        administrator: permissions.contains(Permissions::ADMINISTRATOR),
        can_manage: permissions.intersects(Permissions::MANAGEMENT),
        can_moderate: permissions.intersects(Permissions::MODERATION),
        has_voice: permissions.intersects(Permissions::VOICE_ACCESS),
    }
}
