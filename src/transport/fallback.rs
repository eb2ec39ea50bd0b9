//! Ordered, sequential fallback across transport strategies.

use std::sync::Arc;
use std::time::Duration;

use super::strategies::{HttpTransport, RootDirect, SimpleChat, StreamingRun, SynchronousRun};
use super::{TransportAttemptResult, TransportStrategy};
use crate::endpoint::ServiceEndpoint;
use crate::error::{TransportErrorKind, TransportFailure};
use crate::models::OutgoingMessage;
use crate::traits::HttpClient;

/// Offers one outgoing message to each strategy in order.
///
/// Attempts never overlap: the next strategy runs only after the previous
/// one has failed, so at most one strategy ever succeeds per message.
/// Individual failures are logged and folded into a single aggregate
/// failure when every strategy fails.
pub struct EndpointFallbackClient {
    strategies: Vec<Box<dyn TransportStrategy>>,
}

impl EndpointFallbackClient {
    /// Client over an explicit strategy list, tried in the given order.
    pub fn new(strategies: Vec<Box<dyn TransportStrategy>>) -> Self {
        Self { strategies }
    }

    /// The four standard transports against one endpoint, in the fixed
    /// preference order: streaming run, synchronous run, chat, root.
    pub fn standard(
        http: Arc<dyn HttpClient>,
        endpoint: ServiceEndpoint,
        message_timeout: Duration,
    ) -> Self {
        let transport = HttpTransport::new(http, endpoint).with_timeout(message_timeout);
        Self::new(vec![
            Box::new(StreamingRun::new(transport.clone())),
            Box::new(SynchronousRun::new(transport.clone())),
            Box::new(SimpleChat::new(transport.clone())),
            Box::new(RootDirect::new(transport)),
        ])
    }

    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    /// Send one message, returning the first success or an aggregate failure.
    pub async fn send(&self, message: &OutgoingMessage) -> TransportAttemptResult {
        let mut failures: Vec<String> = Vec::with_capacity(self.strategies.len());
        let mut last_kind = TransportErrorKind::Network;

        for strategy in &self.strategies {
            let kind = strategy.kind();
            match strategy.attempt(message).await {
                success @ TransportAttemptResult::Success { .. } => {
                    tracing::info!(transport = %kind, "Transport succeeded");
                    return success;
                }
                TransportAttemptResult::Failure(failure) => {
                    tracing::warn!(
                        transport = %kind,
                        code = failure.error_code(),
                        detail = %failure.detail,
                        "Transport failed, trying next"
                    );
                    last_kind = failure.kind;
                    failures.push(format!("{}: {}", kind.label(), failure));
                }
            }
        }

        if failures.is_empty() {
            return TransportAttemptResult::failure(
                TransportErrorKind::Network,
                "no transports configured",
            );
        }

        tracing::warn!(attempts = failures.len(), "All transports failed");
        TransportFailure::new(
            last_kind,
            format!("All transports failed: {}", failures.join("; ")),
        )
        .into()
    }
}
