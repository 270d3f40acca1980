//! Subcommand handlers.
//!
//! Each handler writes its output to the given writer and returns errors to
//! `main`, which prints them and exits non-zero.

pub mod decode;
pub mod interactive;
pub mod invite;
pub mod list;

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::cli::Command;
use crate::config::Config;

const RULE_WIDE: &str = "============================================================";
const RULE_NARROW: &str = "========================================";

/// Dispatch a parsed subcommand.
pub fn run<W: Write>(command: Command, config: &Config, out: &mut W) -> Result<()> {
    match command {
        Command::Decode { mask, other, json } => decode::run(&mask, other.as_deref(), json, out),
        Command::Invite {
            client_id,
            permissions,
            guild_id,
            scopes,
            json,
        } => {
            let request = invite::InviteRequest {
                client_id,
                permissions,
                guild_id,
                scopes,
            };
            invite::run(request, config, json, out)
        }
        Command::Interactive { json } => interactive::run(config, json, out),
        Command::Permissions { json } => list::run_permissions(json, out),
        Command::Presets { json } => list::run_presets(json, out),
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
