//! guildperm
//!
//! Decode Discord permission integers and build bot invite links.

use std::io::Write;

use anyhow::Context;
use clap::Parser;

use gp_cli::cli::{Args, Command};
use gp_cli::config::Config;
use gp_cli::{commands, logging};
use gp_common::permissions::{verify_table, PERMISSION_FLAGS};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env();

    logging::init(args.log_format.unwrap_or(config.log_format));

    verify_table(PERMISSION_FLAGS).context("Permission table is inconsistent")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let command = args.command.unwrap_or(Command::Interactive { json: false });
    commands::run(command, &config, &mut out)?;
    out.flush()?;

    Ok(())
}
