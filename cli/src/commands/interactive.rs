//! Guided invite builder.
//!
//! Runs when `guildperm` is started without a subcommand, or via
//! `guildperm interactive`. Prompts and listings go to the terminal through
//! dialoguer; only the finished URL (or JSON) is written to `out`.

use std::io::Write;

use anyhow::{bail, Context, Result};
use dialoguer::{Input, Select};

use gp_common::permissions::{parse_mask, Preset};
use gp_common::InviteError;

use super::invite::{self, PermissionSource};
use super::list;
use crate::config::Config;

/// How the user wants to pick permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionMethod {
    Preset,
    Names,
    Integer,
}

impl PermissionMethod {
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Preset, Self::Names, Self::Integer]
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Preset => "Use a predefined permission set",
            Self::Names => "Enter permission names",
            Self::Integer => "Use a permission integer directly",
        }
    }
}

/// Raw answers collected by [`prompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub client_id: String,
    pub method: PermissionMethod,
    /// Preset name, space-separated flag names or a decimal integer
    pub permissions: String,
    /// Blank to skip
    pub guild_id: String,
}

/// Answers after validation, ready for [`invite::build_from_source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidedInvite {
    pub client_id: String,
    pub source: PermissionSource,
    pub guild_id: Option<String>,
}

/// Validate answers. No prompting happens here.
pub fn interpret(answers: Answers) -> Result<GuidedInvite> {
    let client_id = answers.client_id.trim();
    if client_id.is_empty() {
        return Err(InviteError::EmptyClientId.into());
    }

    let permissions = answers.permissions.trim();
    let source = match answers.method {
        PermissionMethod::Preset => PermissionSource::Preset(permissions.parse::<Preset>()?),
        PermissionMethod::Names => {
            let names: Vec<String> = permissions.split_whitespace().map(str::to_owned).collect();
            if names.is_empty() {
                bail!("At least one permission name is required");
            }
            PermissionSource::Names(names)
        }
        PermissionMethod::Integer => PermissionSource::Integer(parse_mask(permissions)?),
    };

    let guild_id = Some(answers.guild_id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_owned);

    Ok(GuidedInvite {
        client_id: client_id.to_owned(),
        source,
        guild_id,
    })
}

/// Ask the user for everything an invite needs.
pub fn prompt(config: &Config) -> Result<Answers> {
    let mut client_input = Input::<String>::new()
        .with_prompt("Bot client ID (from the Developer Portal)")
        .allow_empty(true);
    if let Some(id) = &config.client_id {
        client_input = client_input.default(id.clone());
    }
    let client_id = client_input
        .interact_text()
        .context("Failed to read client ID")?;

    let labels: Vec<&str> = PermissionMethod::all()
        .iter()
        .map(PermissionMethod::label)
        .collect();
    let choice = Select::new()
        .with_prompt("Choose permission method")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to read permission method")?;
    let method = PermissionMethod::all()
        .get(choice)
        .copied()
        .context("Invalid permission method")?;

    let mut stderr = std::io::stderr();
    let permissions = match method {
        PermissionMethod::Preset => {
            list::run_presets(false, &mut stderr)?;
            let names: Vec<&str> = Preset::all().iter().map(Preset::name).collect();
            let choice = Select::new()
                .with_prompt("Choose a permission set")
                .items(&names)
                .default(0)
                .interact()
                .context("Failed to read permission set")?;
            names
                .get(choice)
                .map(|name| (*name).to_owned())
                .context("Invalid permission set")?
        }
        PermissionMethod::Names => {
            list::run_permissions(false, &mut stderr)?;
            Input::<String>::new()
                .with_prompt("Permission names (space-separated)")
                .interact_text()
                .context("Failed to read permission names")?
        }
        PermissionMethod::Integer => Input::<String>::new()
            .with_prompt("Permission integer")
            .interact_text()
            .context("Failed to read permission integer")?,
    };

    let guild_id = Input::<String>::new()
        .with_prompt("Guild ID (optional, Enter to skip)")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read guild ID")?;

    Ok(Answers {
        client_id,
        method,
        permissions,
        guild_id,
    })
}

/// Run the guided flow and print the result.
pub fn run<W: Write>(config: &Config, json: bool, out: &mut W) -> Result<()> {
    let guided = interpret(prompt(config)?)?;
    let output = invite::build_from_source(
        &guided.client_id,
        guided.source,
        guided.guild_id,
        Vec::new(),
        config,
    )?;
    invite::emit(&output, json, out)
}
