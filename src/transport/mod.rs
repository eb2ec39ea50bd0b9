//! Transports to the agent service and the ordered fallback across them.
//!
//! The service's HTTP contract is not known up front, so a message is offered
//! to each transport in turn until one returns a payload:
//!
//! | Order | Transport      | Request              | Payload              |
//! |-------|----------------|----------------------|----------------------|
//! | 1     | StreamingRun   | `POST /run_sse`      | SSE events, collected|
//! | 2     | SynchronousRun | `POST /run`          | JSON document        |
//! | 3     | SimpleChat     | `POST /chat`         | JSON document        |
//! | 4     | RootDirect     | `POST /`             | JSON document        |

pub mod fallback;
pub mod strategies;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{TransportErrorKind, TransportFailure};
use crate::models::OutgoingMessage;

pub use fallback::EndpointFallbackClient;
pub use strategies::{HttpTransport, RootDirect, SimpleChat, StreamingRun, SynchronousRun};

/// The four transport shapes, in preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    StreamingRun,
    SynchronousRun,
    SimpleChat,
    RootDirect,
}

impl TransportKind {
    /// Fallback order. Fixed; never shuffled per call.
    pub const ORDER: [TransportKind; 4] = [
        TransportKind::StreamingRun,
        TransportKind::SynchronousRun,
        TransportKind::SimpleChat,
        TransportKind::RootDirect,
    ];

    /// Request path relative to the service base URL.
    pub fn path(&self) -> &'static str {
        match self {
            TransportKind::StreamingRun => "/run_sse",
            TransportKind::SynchronousRun => "/run",
            TransportKind::SimpleChat => "/chat",
            TransportKind::RootDirect => "/",
        }
    }

    /// Label recorded as the endpoint used for a reply.
    pub fn label(&self) -> &'static str {
        match self {
            TransportKind::StreamingRun => "POST /run_sse",
            TransportKind::SynchronousRun => "POST /run",
            TransportKind::SimpleChat => "POST /chat",
            TransportKind::RootDirect => "POST /",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one transport attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportAttemptResult {
    Success {
        raw_payload: Value,
        /// Transport that produced the payload.
        transport: TransportKind,
    },
    Failure(TransportFailure),
}

impl TransportAttemptResult {
    pub fn success(transport: TransportKind, raw_payload: Value) -> Self {
        TransportAttemptResult::Success {
            raw_payload,
            transport,
        }
    }

    pub fn failure(kind: TransportErrorKind, detail: impl Into<String>) -> Self {
        TransportAttemptResult::Failure(TransportFailure::new(kind, detail))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TransportAttemptResult::Success { .. })
    }
}

impl From<TransportFailure> for TransportAttemptResult {
    fn from(failure: TransportFailure) -> Self {
        TransportAttemptResult::Failure(failure)
    }
}

/// One request/response adapter against the agent service.
///
/// An attempt performs exactly one HTTP exchange with a bounded timeout and
/// reports every problem as a [`TransportAttemptResult::Failure`].
#[async_trait]
pub trait TransportStrategy: Send + Sync {
    fn kind(&self) -> TransportKind;

    async fn attempt(&self, message: &OutgoingMessage) -> TransportAttemptResult;
}
