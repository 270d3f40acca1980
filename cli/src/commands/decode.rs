//! `decode` command: breakdown of one mask, or comparison of two.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use gp_common::permissions::{
    assess_risk, categorize, compare_masks, decode, display_name, lookup, parse_mask, summarize,
    Capabilities, Category, RiskAssessment,
};

use super::RULE_WIDE;

/// One decoded flag, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagEntry {
    pub name: &'static str,
    pub display_name: String,
    pub bit_value: u64,
}

impl FlagEntry {
    fn from_name(name: &'static str) -> Self {
        Self {
            name,
            display_name: display_name(name),
            bit_value: lookup(name).map_or(0, |flag| flag.bit_value()),
        }
    }
}

/// Everything `decode` prints for a single mask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    /// The mask exactly as parsed, unknown bits included
    pub input: u128,
    /// The mask restricted to known flags
    pub known_bits: u64,
    pub total: usize,
    /// Sorted by display name within each category
    pub categories: BTreeMap<Category, Vec<FlagEntry>>,
    pub risk: RiskAssessment,
    pub capabilities: Capabilities,
}

impl DecodeReport {
    #[must_use]
    pub fn new(input: u128) -> Self {
        let permissions = decode(input);
        let categories = categorize(permissions)
            .into_iter()
            .map(|(category, names)| {
                let mut entries: Vec<FlagEntry> =
                    names.into_iter().map(FlagEntry::from_name).collect();
                entries.sort_by(|a, b| a.display_name.cmp(&b.display_name));
                (category, entries)
            })
            .collect();

        Self {
            input,
            known_bits: permissions.bits(),
            total: permissions.iter().count(),
            categories,
            risk: assess_risk(permissions),
            capabilities: summarize(permissions),
        }
    }
}

/// Result of comparing two masks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareReport {
    pub first: u128,
    pub second: u128,
    pub common: Vec<&'static str>,
    pub only_first: Vec<&'static str>,
    pub only_second: Vec<&'static str>,
}

impl CompareReport {
    #[must_use]
    pub fn new(first: u128, second: u128) -> Self {
        let diff = compare_masks(first, second);
        Self {
            first,
            second,
            common: diff.common.sorted_names(),
            only_first: diff.only_a.sorted_names(),
            only_second: diff.only_b.sorted_names(),
        }
    }
}

/// Run `decode`.
pub fn run<W: Write>(mask: &str, other: Option<&str>, json: bool, out: &mut W) -> Result<()> {
    let first = parse_mask(mask)?;

    match other {
        Some(other) => {
            let second = parse_mask(other)?;
            tracing::debug!(first = %first, second = %second, "Comparing permission sets");
            let report = CompareReport::new(first, second);
            if json {
                super::write_json(out, &report)
            } else {
                render_compare(&report, out)
            }
        }
        None => {
            tracing::debug!(mask = %first, "Decoding permission integer");
            let report = DecodeReport::new(first);
            if json {
                super::write_json(out, &report)
            } else {
                render_decode(&report, out)
            }
        }
    }
}

pub fn render_decode<W: Write>(report: &DecodeReport, out: &mut W) -> Result<()> {
    writeln!(out, "Permission Integer: {}", report.input)?;
    writeln!(out, "{RULE_WIDE}")?;

    if report.total == 0 {
        writeln!(out, "No known permissions set")?;
        return Ok(());
    }

    writeln!(out, "Total Permissions: {}", report.total)?;
    writeln!(out)?;

    for (category, entries) in &report.categories {
        writeln!(out, "{category} Permissions ({}):", entries.len())?;
        for entry in entries {
            writeln!(out, "   - {} (bit: {})", entry.display_name, entry.bit_value)?;
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "Permission Risk Level: {} - {}",
        report.risk.level, report.risk.reason
    )?;
    writeln!(out)?;
    writeln!(out, "Summary:")?;
    render_capabilities(&report.capabilities, out)
}

fn render_capabilities<W: Write>(caps: &Capabilities, out: &mut W) -> Result<()> {
    if caps.administrator {
        writeln!(out, "   ADMINISTRATOR - has ALL permissions")?;
        return Ok(());
    }
    if caps.can_manage {
        writeln!(out, "   Can manage server/channels/roles")?;
    }
    if caps.can_moderate {
        writeln!(out, "   Has moderation capabilities")?;
    }
    if caps.has_voice {
        writeln!(out, "   Has voice channel access")?;
    }
    if caps.is_basic() {
        writeln!(out, "   Basic utility bot permissions")?;
    }
    Ok(())
}

pub fn render_compare<W: Write>(report: &CompareReport, out: &mut W) -> Result<()> {
    writeln!(out, "Comparing Permissions")?;
    writeln!(out, "{}", super::RULE_NARROW)?;
    writeln!(out, "Permission Set 1: {}", report.first)?;
    writeln!(out, "Permission Set 2: {}", report.second)?;
    writeln!(out)?;

    let sections = [
        ("Common Permissions", "*", &report.common),
        ("Only in Set 1", "+", &report.only_first),
        ("Only in Set 2", "+", &report.only_second),
    ];
    for (title, marker, names) in sections {
        if names.is_empty() {
            continue;
        }
        writeln!(out, "{title} ({}):", names.len())?;
        for name in names {
            writeln!(out, "   {marker} {}", display_name(name))?;
        }
        writeln!(out)?;
    }

    if report.common.is_empty() && report.only_first.is_empty() && report.only_second.is_empty() {
        writeln!(out, "Neither set contains known permissions")?;
    }
    Ok(())
}
