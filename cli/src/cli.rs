//! Command-line argument definitions.

use clap::{Parser, Subcommand};

use crate::logging::LogFormat;

/// guildperm - decode Discord permission integers and build bot invite links
#[derive(Parser, Debug)]
#[command(name = "guildperm")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Defaults to the guided invite builder
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Log output format (overrides GUILDPERM_LOG_FORMAT)
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Decode a permission integer, or compare two
    Decode {
        /// Permission integer
        mask: String,

        /// Second permission integer; switches to comparison
        other: Option<String>,

        /// Print JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Build an OAuth2 invite URL
    Invite {
        /// Application (client) ID; `-` uses GUILDPERM_CLIENT_ID
        client_id: String,

        /// A permission integer, a preset name, or permission names
        #[arg(required = true, num_args = 1..)]
        permissions: Vec<String>,

        /// Preselect this guild on the authorization page
        #[arg(long)]
        guild_id: Option<String>,

        /// OAuth2 scope; repeat for several (default: bot applications.commands)
        #[arg(long = "scope")]
        scopes: Vec<String>,

        /// Print JSON instead of the bare URL
        #[arg(long)]
        json: bool,
    },
    /// Build an invite URL step by step (default when no subcommand is given)
    Interactive {
        /// Print JSON instead of the bare URL
        #[arg(long)]
        json: bool,
    },
    /// List every known permission by category
    Permissions {
        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },
    /// List the predefined permission sets
    Presets {
        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_are_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_decode_compare() {
        let args = Args::try_parse_from(["guildperm", "decode", "2048", "10240"]).unwrap();
        assert_eq!(
            args.command.unwrap(),
            Command::Decode {
                mask: "2048".into(),
                other: Some("10240".into()),
                json: false,
            }
        );
    }

    #[test]
    fn test_parse_invite_names_and_flags() {
        let args = Args::try_parse_from([
            "guildperm",
            "invite",
            "123",
            "send_messages",
            "speak",
            "--guild-id",
            "9",
            "--scope",
            "bot",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.log_format, Some(LogFormat::Json));
        assert_eq!(
            args.command.unwrap(),
            Command::Invite {
                client_id: "123".into(),
                permissions: vec!["send_messages".into(), "speak".into()],
                guild_id: Some("9".into()),
                scopes: vec!["bot".into()],
                json: false,
            }
        );
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let args = Args::try_parse_from(["guildperm"]).unwrap();
        assert_eq!(args.command, None);
    }

    #[test]
    fn test_parse_interactive() {
        let args = Args::try_parse_from(["guildperm", "interactive", "--json"]).unwrap();
        assert_eq!(args.command, Some(Command::Interactive { json: true }));
    }

    #[test]
    fn test_invite_requires_permissions() {
        assert!(Args::try_parse_from(["guildperm", "invite", "123"]).is_err());
    }
}
