//! Transport failure taxonomy.
//!
//! Every strategy attempt that does not produce a payload ends in a
//! [`TransportFailure`]. The fallback client records these and only surfaces
//! them in aggregate.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::traits::HttpError;

/// Longest response body excerpt kept in an `Http` failure detail.
pub const MAX_BODY_SNIPPET: usize = 500;

/// Failure classes for a single transport attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// Connection refused, DNS failure, broken body stream.
    Network,
    /// The request exceeded its timeout.
    Timeout,
    /// The service answered with a non-2xx status.
    Http,
    /// The body could not be parsed as JSON.
    Decode,
}

impl TransportErrorKind {
    /// Short lowercase label used in aggregate details.
    pub fn label(&self) -> &'static str {
        match self {
            TransportErrorKind::Network => "network",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Http => "http",
            TransportErrorKind::Decode => "decode",
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportErrorKind::Network => "E_TRANSPORT_NETWORK",
            TransportErrorKind::Timeout => "E_TRANSPORT_TIMEOUT",
            TransportErrorKind::Http => "E_TRANSPORT_HTTP",
            TransportErrorKind::Decode => "E_TRANSPORT_DECODE",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A failed transport attempt: what went wrong and a human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{kind}] {detail}")]
pub struct TransportFailure {
    pub kind: TransportErrorKind,
    pub detail: String,
}

impl TransportFailure {
    pub fn new(kind: TransportErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Non-2xx status; the body is truncated to [`MAX_BODY_SNIPPET`] chars.
    pub fn http_status(status: u16, body: &str) -> Self {
        Self::new(
            TransportErrorKind::Http,
            format!("HTTP {}: {}", status, snippet(body, MAX_BODY_SNIPPET)),
        )
    }

    /// Body was not valid JSON.
    pub fn decode(err: &serde_json::Error) -> Self {
        Self::new(
            TransportErrorKind::Decode,
            format!("Invalid JSON response: {}", err),
        )
    }

    /// Classify an [`HttpError`], naming the timeout that was exceeded.
    pub fn from_http(err: HttpError, timeout: Duration) -> Self {
        match err {
            HttpError::Timeout(_) => Self::new(
                TransportErrorKind::Timeout,
                format!("Request timed out after {}s", timeout.as_secs()),
            ),
            HttpError::ServerError { status, message } => Self::http_status(status, &message),
            other => Self::new(
                TransportErrorKind::Network,
                format!("Connection error: {}", other),
            ),
        }
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }
}

/// First `max` characters of `text`, marking the cut.
pub(crate) fn snippet(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
