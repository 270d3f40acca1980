//! tracing-subscriber initialization.
//!
//! Logs go to stderr so that stdout carries only command output (URLs,
//! reports, JSON) and can be piped.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "gp_cli=info,gp_common=info";

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Single-line, no timestamps
    #[default]
    Compact,
    /// Multi-line, human oriented
    Pretty,
    /// One JSON object per line
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter. Calling this twice is a no-op.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match format {
        LogFormat::Compact => builder.compact().without_time().with_target(false).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}
