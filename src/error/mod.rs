//! Error types for the chat client.
//!
//! | Type               | Raised by                    | Surfaced to user      |
//! |--------------------|------------------------------|-----------------------|
//! | `TransportFailure` | one strategy attempt         | only in aggregate     |
//! | `SessionError`     | remote session creation      | yes, chat stays usable|
//! | `ConfigError`      | endpoint / CLI configuration | yes, at startup       |
//!
//! The response normalizer has its own error type, but it never escapes:
//! it is folded into an `Error`-status message.

mod config;
mod session;
mod transport;

pub use config::ConfigError;
pub use session::SessionError;
pub use transport::{TransportErrorKind, TransportFailure, MAX_BODY_SNIPPET};

pub(crate) use transport::snippet;
