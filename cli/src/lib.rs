//! `guildperm` command-line front end.
//!
//! The binary is a thin wrapper over [`commands::run`]; everything else is
//! exposed here so it can be exercised from integration tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
