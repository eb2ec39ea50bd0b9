//! Client configuration.
//!
//! Values come from the environment first, then the command line overrides
//! them (see [`crate::cli::args`]).
//!
//! # Example
//!
//! ```
//! use adk_chat::config::ClientConfig;
//!
//! let config = ClientConfig::default()
//!     .with_service_url("http://localhost:8000")
//!     .with_app_name("website_agent")
//!     .with_debug(true);
//! assert!(config.endpoint().is_ok());
//! ```

use std::time::Duration;

use crate::endpoint::ServiceEndpoint;
use crate::error::ConfigError;
use crate::models::DEFAULT_APP_NAME;
use crate::service::{HEALTH_TIMEOUT, SESSION_TIMEOUT};
use crate::traits::Headers;
use crate::transport::strategies::MESSAGE_TIMEOUT;

pub const ENV_URL: &str = "ADK_CHAT_URL";
pub const ENV_APP_NAME: &str = "ADK_CHAT_APP_NAME";
pub const ENV_DEBUG: &str = "ADK_CHAT_DEBUG";
pub const ENV_HEADERS: &str = "ADK_CHAT_HEADERS";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the agent service.
    pub service_url: Option<String>,
    pub app_name: String,
    /// Extra headers sent on every request (e.g. `Authorization`).
    pub headers: Headers,
    /// Show raw responses.
    pub debug: bool,
    pub message_timeout: Duration,
    pub session_timeout: Duration,
    pub health_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            app_name: DEFAULT_APP_NAME.to_string(),
            headers: Headers::new(),
            debug: false,
            message_timeout: MESSAGE_TIMEOUT,
            session_timeout: SESSION_TIMEOUT,
            health_timeout: HEALTH_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into());
        self
    }

    /// Set the app name. Blank names keep the current one.
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.app_name = name.trim().to_string();
        }
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_message_timeout(mut self, timeout: Duration) -> Self {
        self.message_timeout = timeout;
        self
    }

    pub fn with_session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = timeout;
        self
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Read `ADK_CHAT_URL`, `ADK_CHAT_APP_NAME`, `ADK_CHAT_DEBUG` and
    /// `ADK_CHAT_HEADERS` (`Name: value` pairs separated by `;`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_URL) {
            if !url.trim().is_empty() {
                config = config.with_service_url(url.trim());
            }
        }
        if let Ok(name) = std::env::var(ENV_APP_NAME) {
            config = config.with_app_name(name);
        }
        config.debug = std::env::var(ENV_DEBUG).is_ok();

        if let Ok(raw) = std::env::var(ENV_HEADERS) {
            for entry in raw.split(';').filter(|entry| !entry.trim().is_empty()) {
                let (name, value) = parse_header(entry)?;
                config = config.with_header(name, value);
            }
        }

        Ok(config)
    }

    /// The configured endpoint, validated.
    pub fn endpoint(&self) -> Result<ServiceEndpoint, ConfigError> {
        let url = self.service_url.as_deref().ok_or(ConfigError::MissingUrl)?;
        ServiceEndpoint::with_headers(url, self.headers.clone())
    }
}

/// Split `Name: value` into its parts.
pub fn parse_header(raw: &str) -> Result<(String, String), ConfigError> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| ConfigError::InvalidHeader(raw.to_string()))?;
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidHeader(raw.to_string()));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
