//! Command-line argument parsing for adk-chat.
//!
//! Flags are few, so they are matched by hand.

use crate::config::{parse_header, ClientConfig};
use crate::error::ConfigError;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Probe `GET /health` once and exit
    Health(ClientConfig),
    /// Interactive chat (default)
    Chat(ClientConfig),
}

pub const USAGE: &str = "\
Usage: adk-chat [OPTIONS]

Options:
  --url <URL>            Agent service base URL (env: ADK_CHAT_URL)
  --app <NAME>           App name (env: ADK_CHAT_APP_NAME, default: agent)
  --header 'Name: value' Extra request header, repeatable (env: ADK_CHAT_HEADERS)
  --debug                Show raw responses (env: ADK_CHAT_DEBUG)
  --health               Check service health and exit
  -V, --version          Print version
  -h, --help             Print this help
";

/// Parse command-line arguments on top of `base` (usually the environment
/// config). Command-line values win.
///
/// # Examples
///
/// ```
/// use adk_chat::cli::args::{parse_args, CliCommand};
/// use adk_chat::config::ClientConfig;
///
/// let args = vec!["adk-chat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter(), ClientConfig::default()).unwrap(), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I, base: ClientConfig) -> Result<CliCommand, ConfigError>
where
    I: Iterator<Item = String>,
{
    let mut config = base;
    let mut health = false;
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--debug" => config.debug = true,
            "--health" => health = true,
            "--url" => {
                let url = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                config = config.with_service_url(url);
            }
            "--app" => {
                let app = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                config = config.with_app_name(app);
            }
            "--header" => {
                let raw = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                let (name, value) = parse_header(&raw)?;
                config = config.with_header(name, value);
            }
            other => return Err(ConfigError::UnknownArgument(other.to_string())),
        }
    }

    if health {
        Ok(CliCommand::Health(config))
    } else {
        Ok(CliCommand::Chat(config))
    }
}
