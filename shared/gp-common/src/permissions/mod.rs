//! Discord permission bitmask model.
//!
//! - [`flags`]: the bitflags type and the name/category table
//! - [`codec`]: integer and name conversions, set comparison
//! - [`category`]: display grouping
//! - [`risk`]: risk level and capability summary
//! - [`presets`]: named permission sets

pub mod category;
pub mod codec;
pub mod flags;
pub mod presets;
pub mod risk;

pub use category::{categorize, Category};
pub use codec::{compare, compare_masks, decode, encode, parse_mask, Encoded, PermissionDiff};
pub use flags::{display_name, lookup, verify_table, PermissionFlag, Permissions, PERMISSION_FLAGS};
pub use presets::Preset;
pub use risk::{assess_risk, risk_level, summarize, Capabilities, RiskAssessment, RiskLevel};
