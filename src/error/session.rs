//! Session-creation errors.
//!
//! Kept separate from transport failures: a failed session setup is shown to
//! the user, while chat itself keeps working without a session.

use thiserror::Error;

use super::transport::TransportFailure;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The request never produced a response.
    #[error("{0}")]
    Transport(TransportFailure),
}

impl SessionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::Rejected { .. } => "E_SESSION_REJECTED",
            SessionError::Transport(failure) => failure.error_code(),
        }
    }

    /// Message suitable for the status line.
    pub fn user_message(&self) -> String {
        format!("Failed to create session: {}", self)
    }
}

impl From<TransportFailure> for SessionError {
    fn from(failure: TransportFailure) -> Self {
        SessionError::Transport(failure)
    }
}
