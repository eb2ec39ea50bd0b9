//! Non-chat calls to the agent service: health probe and session creation.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::endpoint::ServiceEndpoint;
use crate::error::{snippet, SessionError, TransportFailure};
use crate::traits::HttpClient;

/// Timeout for creating a remote session.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for the health probe.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest body excerpt kept in a health detail.
const HEALTH_DETAIL_CHARS: usize = 200;

/// Result of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    /// True only for status 200.
    pub success: bool,
    pub status_code: Option<u16>,
    /// Body excerpt, or the error when no response arrived.
    pub detail: String,
}

/// A session created on the service.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInfo {
    pub session_id: String,
    pub user_id: String,
    /// Response body, or `{}` when the body was empty or not JSON.
    pub response: Value,
}

/// Client for the service's bookkeeping endpoints.
#[derive(Clone)]
pub struct ServiceClient {
    http: Arc<dyn HttpClient>,
    endpoint: ServiceEndpoint,
    session_timeout: Duration,
    health_timeout: Duration,
}

impl ServiceClient {
    pub fn new(http: Arc<dyn HttpClient>, endpoint: ServiceEndpoint) -> Self {
        Self {
            http,
            endpoint,
            session_timeout: SESSION_TIMEOUT,
            health_timeout: HEALTH_TIMEOUT,
        }
    }

    pub fn with_session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = timeout;
        self
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    /// Probe `GET /health`. Never fails; problems are reported in the status.
    pub async fn health_check(&self) -> HealthStatus {
        let url = self.endpoint.url("/health");
        tracing::debug!(url = %url, "Checking service health");

        match self
            .http
            .get(&url, self.endpoint.headers(), self.health_timeout)
            .await
        {
            Ok(response) => {
                let body = response.text_lossy();
                let detail = if body.is_empty() {
                    "No response".to_string()
                } else {
                    body.chars().take(HEALTH_DETAIL_CHARS).collect()
                };
                HealthStatus {
                    success: response.status == 200,
                    status_code: Some(response.status),
                    detail,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Health check failed");
                HealthStatus {
                    success: false,
                    status_code: None,
                    detail: TransportFailure::from_http(err, self.health_timeout).detail,
                }
            }
        }
    }

    /// Create a session for `user_id` under `app_name`.
    ///
    /// The session id is chosen client-side as `session-<unix seconds>`.
    pub async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
    ) -> Result<SessionInfo, SessionError> {
        let session_id = format!("session-{}", chrono::Utc::now().timestamp());
        let url = self.endpoint.url(&format!(
            "/apps/{}/users/{}/sessions/{}",
            urlencoding::encode(app_name),
            urlencoding::encode(user_id),
            urlencoding::encode(&session_id),
        ));
        tracing::debug!(url = %url, "Creating session");

        let response = self
            .http
            .post(&url, "{}", self.endpoint.headers(), self.session_timeout)
            .await
            .map_err(|err| TransportFailure::from_http(err, self.session_timeout))?;

        if !response.is_success() {
            let body = snippet(&response.text_lossy(), crate::error::MAX_BODY_SNIPPET);
            tracing::warn!(status = response.status, "Session creation rejected");
            return Err(SessionError::Rejected {
                status: response.status,
                body,
            });
        }

        let body = response
            .json::<Value>()
            .unwrap_or_else(|_| Value::Object(Map::new()));
        tracing::info!(session_id = %session_id, "Session created");

        Ok(SessionInfo {
            session_id,
            user_id: user_id.to_string(),
            response: body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::error::TransportErrorKind;
    use crate::traits::HttpError;
    use serde_json::json;

    fn client(mock: &MockHttpClient) -> ServiceClient {
        ServiceClient::new(
            Arc::new(mock.clone()),
            ServiceEndpoint::new("http://agent.test/").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_health_ok() {
        let mock = MockHttpClient::new();
        mock.set_response("http://agent.test/health", MockResponse::json(200, r#"{"status":"ok"}"#));

        let status = client(&mock).health_check().await;
        assert!(status.success);
        assert_eq!(status.status_code, Some(200));
        assert_eq!(status.detail, r#"{"status":"ok"}"#);
        assert_eq!(mock.get_requests()[0].timeout, HEALTH_TIMEOUT);
    }

    #[tokio::test]
    async fn test_health_non_200_is_unhealthy() {
        let mock = MockHttpClient::new();
        mock.set_response("http://agent.test/health", MockResponse::json(204, ""));

        let status = client(&mock).health_check().await;
        assert!(!status.success);
        assert_eq!(status.detail, "No response");
    }

    #[tokio::test]
    async fn test_health_detail_truncated() {
        let mock = MockHttpClient::new();
        let body = "y".repeat(1000);
        mock.set_response("http://agent.test/health", MockResponse::json(200, &body));

        let status = client(&mock).health_check().await;
        assert_eq!(status.detail.chars().count(), 200);
    }

    #[tokio::test]
    async fn test_health_connection_error() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(HttpError::ConnectionFailed("refused".into())));

        let status = client(&mock).health_check().await;
        assert!(!status.success);
        assert_eq!(status.status_code, None);
        assert!(status.detail.contains("refused"));
    }

    #[tokio::test]
    async fn test_create_session_success() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, r#"{"id":"abc"}"#));

        let info = client(&mock)
            .create_session("website_agent", "user-1")
            .await
            .unwrap();
        assert!(info.session_id.starts_with("session-"));
        assert_eq!(info.user_id, "user-1");
        assert_eq!(info.response, json!({"id": "abc"}));

        let request = &mock.get_requests()[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.body.as_deref(), Some("{}"));
        assert_eq!(request.timeout, SESSION_TIMEOUT);
        assert_eq!(
            request.url,
            format!("http://agent.test/apps/website_agent/users/user-1/sessions/{}", info.session_id)
        );
    }

    #[tokio::test]
    async fn test_create_session_encodes_path_segments() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(201, ""));

        let info = client(&mock).create_session("my app", "a/b").await.unwrap();
        assert_eq!(info.response, json!({}));
        assert!(mock.get_requests()[0]
            .url
            .starts_with("http://agent.test/apps/my%20app/users/a%2Fb/sessions/"));
    }

    #[tokio::test]
    async fn test_create_session_rejected() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(500, "boom"));

        let err = client(&mock).create_session("agent", "user-1").await.unwrap_err();
        assert_eq!(
            err,
            SessionError::Rejected {
                status: 500,
                body: "boom".into()
            }
        );
    }

    #[tokio::test]
    async fn test_create_session_timeout() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(HttpError::Timeout("slow".into())));

        match client(&mock).create_session("agent", "user-1").await {
            Err(SessionError::Transport(failure)) => {
                assert_eq!(failure.kind, TransportErrorKind::Timeout);
                assert_eq!(failure.detail, "Request timed out after 30s");
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
