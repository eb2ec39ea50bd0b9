//! The four transport strategies.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::{TransportAttemptResult, TransportKind, TransportStrategy};
use crate::endpoint::ServiceEndpoint;
use crate::error::{TransportErrorKind, TransportFailure};
use crate::models::{ChatRequest, OutgoingMessage, RootRequest, RunRequest};
use crate::sse::collect_events;
use crate::traits::HttpClient;

/// Timeout for message exchanges. The agent may run slow tools.
pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(120);

/// Shared HTTP plumbing: one endpoint, one client, one timeout.
#[derive(Clone)]
pub struct HttpTransport {
    http: Arc<dyn HttpClient>,
    endpoint: ServiceEndpoint,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(http: Arc<dyn HttpClient>, endpoint: ServiceEndpoint) -> Self {
        Self {
            http,
            endpoint,
            timeout: MESSAGE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn encode<B: Serialize>(body: &B) -> Result<String, TransportFailure> {
        serde_json::to_string(body).map_err(|e| {
            TransportFailure::new(
                TransportErrorKind::Decode,
                format!("Could not encode request: {}", e),
            )
        })
    }

    /// POST a JSON body and parse the whole response as JSON.
    pub async fn post_json<B: Serialize + Sync>(
        &self,
        kind: TransportKind,
        body: &B,
    ) -> TransportAttemptResult {
        let body = match Self::encode(body) {
            Ok(body) => body,
            Err(failure) => return failure.into(),
        };
        let url = self.endpoint.url(kind.path());
        tracing::debug!(transport = %kind, url = %url, "Attempting transport");

        let response = match self
            .http
            .post(&url, &body, self.endpoint.headers(), self.timeout)
            .await
        {
            Ok(response) => response,
            Err(err) => return TransportFailure::from_http(err, self.timeout).into(),
        };

        if !response.is_success() {
            return TransportFailure::http_status(response.status, &response.text_lossy()).into();
        }

        match response.json::<Value>() {
            Ok(payload) => TransportAttemptResult::success(kind, payload),
            Err(err) => TransportFailure::decode(&err).into(),
        }
    }

    /// POST a JSON body and collect every SSE event of the response.
    pub async fn post_sse<B: Serialize + Sync>(
        &self,
        kind: TransportKind,
        body: &B,
    ) -> TransportAttemptResult {
        let body = match Self::encode(body) {
            Ok(body) => body,
            Err(failure) => return failure.into(),
        };
        let url = self.endpoint.url(kind.path());
        tracing::debug!(transport = %kind, url = %url, "Attempting streaming transport");

        let stream = match self
            .http
            .post_stream(&url, &body, self.endpoint.headers(), self.timeout)
            .await
        {
            Ok(stream) => stream,
            Err(err) => return TransportFailure::from_http(err, self.timeout).into(),
        };

        match collect_events(stream).await {
            Ok(events) => {
                tracing::debug!(transport = %kind, events = events.len(), "Collected SSE events");
                TransportAttemptResult::success(kind, Value::Array(events))
            }
            Err(err) => TransportFailure::from_http(err, self.timeout).into(),
        }
    }
}

/// `POST /run_sse`, response read as Server-Sent Events.
pub struct StreamingRun {
    transport: HttpTransport,
}

impl StreamingRun {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl TransportStrategy for StreamingRun {
    fn kind(&self) -> TransportKind {
        TransportKind::StreamingRun
    }

    async fn attempt(&self, message: &OutgoingMessage) -> TransportAttemptResult {
        let body = RunRequest::from_message(message);
        self.transport.post_sse(self.kind(), &body).await
    }
}

/// `POST /run`, whole JSON response.
pub struct SynchronousRun {
    transport: HttpTransport,
}

impl SynchronousRun {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl TransportStrategy for SynchronousRun {
    fn kind(&self) -> TransportKind {
        TransportKind::SynchronousRun
    }

    async fn attempt(&self, message: &OutgoingMessage) -> TransportAttemptResult {
        let body = RunRequest::from_message(message);
        self.transport.post_json(self.kind(), &body).await
    }
}

/// `POST /chat` with `{message, user_id?, session_id?}`.
pub struct SimpleChat {
    transport: HttpTransport,
}

impl SimpleChat {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl TransportStrategy for SimpleChat {
    fn kind(&self) -> TransportKind {
        TransportKind::SimpleChat
    }

    async fn attempt(&self, message: &OutgoingMessage) -> TransportAttemptResult {
        let body = ChatRequest::from_message(message);
        self.transport.post_json(self.kind(), &body).await
    }
}

/// `POST /` with `{query, user_id, session_id}`, for services without a
/// dedicated chat route.
pub struct RootDirect {
    transport: HttpTransport,
}

impl RootDirect {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl TransportStrategy for RootDirect {
    fn kind(&self) -> TransportKind {
        TransportKind::RootDirect
    }

    async fn attempt(&self, message: &OutgoingMessage) -> TransportAttemptResult {
        let body = RootRequest::from_message(message);
        self.transport.post_json(self.kind(), &body).await
    }
}
