//! One conversation with the agent service.
//!
//! [`ConversationSession`] owns the identity fields and the append-only
//! history. The service keeps conversation memory keyed by session id, so
//! each send carries only the new user text.

use std::sync::Arc;

use serde_json::json;

use crate::config::ClientConfig;
use crate::error::{ConfigError, SessionError};
use crate::models::{ConversationMessage, NormalizedMessage, OutgoingMessage, ALL_ENDPOINTS_FAILED_TEXT};
use crate::normalize::normalize;
use crate::service::{HealthStatus, ServiceClient};
use crate::traits::HttpClient;
use crate::transport::{EndpointFallbackClient, TransportAttemptResult};

/// A single logical conversation.
///
/// Callers must not start a new [`send`](Self::send) while one is in
/// flight; `&mut self` enforces that within one task.
pub struct ConversationSession {
    fallback: EndpointFallbackClient,
    service: ServiceClient,
    app_name: String,
    user_id: String,
    session_id: Option<String>,
    history: Vec<ConversationMessage>,
}

impl ConversationSession {
    pub fn new(
        fallback: EndpointFallbackClient,
        service: ServiceClient,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            fallback,
            service,
            app_name: app_name.into(),
            user_id: format!("user-{}", uuid::Uuid::new_v4()),
            session_id: None,
            history: Vec::new(),
        }
    }

    /// Wire up the standard transports and service client from `config`.
    pub fn from_config(http: Arc<dyn HttpClient>, config: &ClientConfig) -> Result<Self, ConfigError> {
        let endpoint = config.endpoint()?;
        let fallback =
            EndpointFallbackClient::standard(http.clone(), endpoint.clone(), config.message_timeout);
        let service = ServiceClient::new(http, endpoint)
            .with_session_timeout(config.session_timeout)
            .with_health_timeout(config.health_timeout);
        Ok(Self::new(fallback, service, config.app_name.clone()))
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Use a session id obtained elsewhere, or drop the current one.
    pub fn set_session_id(&mut self, session_id: Option<String>) {
        self.session_id = session_id.filter(|id| !id.is_empty());
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn history(&self) -> &[ConversationMessage] {
        &self.history
    }

    pub fn last_message(&self) -> Option<&ConversationMessage> {
        self.history.last()
    }

    pub async fn health_check(&self) -> HealthStatus {
        self.service.health_check().await
    }

    /// Create a remote session and remember its id.
    ///
    /// On failure the previous session id (if any) is kept and chat keeps
    /// working.
    pub async fn create_session(&mut self) -> Result<String, SessionError> {
        let info = self
            .service
            .create_session(&self.app_name, &self.user_id)
            .await?;
        self.session_id = Some(info.session_id.clone());
        Ok(info.session_id)
    }

    /// Start over with a fresh remote session. History is cleared only if
    /// the session was created.
    pub async fn new_session(&mut self) -> Result<String, SessionError> {
        let session_id = self.create_session().await?;
        self.history.clear();
        Ok(session_id)
    }

    /// Forget history and session id. The user id and endpoint stay.
    pub fn reset(&mut self) {
        self.history.clear();
        self.session_id = None;
    }

    /// Send one user message and record the reply. Never fails: total
    /// transport failure becomes an error-status reply.
    pub async fn send(&mut self, text: &str) -> NormalizedMessage {
        self.history.push(ConversationMessage::user(text));

        let outgoing = OutgoingMessage::new(
            text,
            self.user_id.clone(),
            self.session_id.clone(),
            self.app_name.clone(),
        );

        match self.fallback.send(&outgoing).await {
            TransportAttemptResult::Success {
                raw_payload,
                transport,
            } => {
                let normalized = normalize(&raw_payload);
                self.history
                    .push(ConversationMessage::assistant(&normalized, transport.label()));
                normalized
            }
            TransportAttemptResult::Failure(failure) => {
                tracing::warn!(code = failure.error_code(), "No transport produced a reply");
                let normalized = NormalizedMessage::error(
                    ALL_ENDPOINTS_FAILED_TEXT,
                    json!({ "error": failure.detail }),
                );
                let mut reply = ConversationMessage::transport_failure();
                reply.raw_response = Some(normalized.raw_response.clone());
                self.history.push(reply);
                normalized
            }
        }
    }
}
