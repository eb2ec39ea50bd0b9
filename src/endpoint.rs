//! Agent service endpoint: base URL plus the headers sent on every request.

use crate::error::ConfigError;
use crate::traits::Headers;

/// Where the agent service lives. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceEndpoint {
    base_url: String,
    headers: Headers,
}

impl ServiceEndpoint {
    /// Build an endpoint from a base URL, stripping trailing slashes.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Self::with_headers(base_url, Headers::new())
    }

    /// Build an endpoint that also passes the given headers through.
    ///
    /// `Content-Type: application/json` is always present; a configured
    /// value for it is overridden.
    pub fn with_headers(base_url: &str, extra: Headers) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let lower = trimmed.to_ascii_lowercase();
        let has_host = lower
            .strip_prefix("https://")
            .or_else(|| lower.strip_prefix("http://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(ConfigError::InvalidUrl(base_url.to_string()));
        }

        let mut headers: Headers = extra
            .into_iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case("content-type"))
            .collect();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Ok(Self {
            base_url: trimmed.to_string(),
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Join a path (starting with `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
