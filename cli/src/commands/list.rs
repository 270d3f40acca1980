//! `permissions` and `presets` listings.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use gp_common::permissions::{risk_level, Category, Preset, RiskLevel, PERMISSION_FLAGS};

use super::decode::FlagEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryListing {
    pub category: Category,
    pub permissions: Vec<FlagEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetListing {
    pub name: &'static str,
    pub permissions: u64,
    pub risk: RiskLevel,
    pub flags: Vec<&'static str>,
}

/// Every known flag grouped by category, in bit order within each group.
pub fn permission_listing() -> Vec<CategoryListing> {
    Category::all()
        .iter()
        .map(|&category| CategoryListing {
            category,
            permissions: PERMISSION_FLAGS
                .iter()
                .filter(|flag| flag.category == category)
                .map(|flag| FlagEntry {
                    name: flag.name,
                    display_name: flag.display_name(),
                    bit_value: flag.bit_value(),
                })
                .collect(),
        })
        .filter(|listing| !listing.permissions.is_empty())
        .collect()
}

pub fn preset_listing() -> Vec<PresetListing> {
    Preset::all()
        .iter()
        .map(|preset| PresetListing {
            name: preset.name(),
            permissions: preset.permissions().bits(),
            risk: risk_level(preset.permissions()),
            flags: preset.flag_names(),
        })
        .collect()
}

pub fn run_permissions<W: Write>(json: bool, out: &mut W) -> Result<()> {
    let listing = permission_listing();
    if json {
        return super::write_json(out, &listing);
    }

    writeln!(out, "Available Discord Permissions")?;
    writeln!(out, "{}", super::RULE_WIDE)?;
    for group in &listing {
        writeln!(out)?;
        writeln!(out, "{} Permissions:", group.category)?;
        for entry in &group.permissions {
            writeln!(out, "   {:<40} {}", entry.name, entry.bit_value)?;
        }
    }
    Ok(())
}

pub fn run_presets<W: Write>(json: bool, out: &mut W) -> Result<()> {
    let listing = preset_listing();
    if json {
        return super::write_json(out, &listing);
    }

    writeln!(out, "Permission Presets")?;
    writeln!(out, "{}", super::RULE_NARROW)?;
    for preset in &listing {
        writeln!(out)?;
        writeln!(
            out,
            "{} ({}) - risk {}",
            preset.name, preset.permissions, preset.risk
        )?;
        writeln!(out, "   {}", preset.flags.join(", "))?;
    }
    Ok(())
}
