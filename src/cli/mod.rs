//! Command-line interface for adk-chat.
//!
//! - [`args`] parses flags into a [`CliCommand`]
//! - [`version`] holds the version string
//!
//! ```ignore
//! use adk_chat::cli::{parse_args, CliCommand};
//! use adk_chat::config::ClientConfig;
//!
//! let command = parse_args(std::env::args(), ClientConfig::from_env()?)?;
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use version::{version_line, VERSION};
