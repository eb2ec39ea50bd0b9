//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No service URL was configured.
    #[error("no service URL configured (use --url or ADK_CHAT_URL)")]
    MissingUrl,

    /// The URL is empty or not http(s).
    #[error("invalid service URL '{0}': expected http:// or https://")]
    InvalidUrl(String),

    /// A header was not in `Name: value` form.
    #[error("invalid header '{0}': expected 'Name: value'")]
    InvalidHeader(String),

    /// A flag expected a value.
    #[error("missing value for {0}")]
    MissingValue(String),

    /// Unrecognized command-line flag.
    #[error("unknown argument '{0}'")]
    UnknownArgument(String),
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::MissingUrl => "E_CFG_URL_MISSING",
            ConfigError::InvalidUrl(_) => "E_CFG_URL",
            ConfigError::InvalidHeader(_) => "E_CFG_HEADER",
            ConfigError::MissingValue(_) => "E_CFG_VALUE",
            ConfigError::UnknownArgument(_) => "E_CFG_ARG",
        }
    }
}
