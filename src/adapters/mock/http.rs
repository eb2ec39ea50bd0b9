//! Mock HTTP client for testing.
//!
//! Returns predefined responses per URL and records every request so tests
//! can assert which transports were attempted, in which order, with which
//! body and timeout.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET or POST)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (for POST requests)
    pub body: Option<String>,
    /// Timeout the caller asked for
    pub timeout: Duration,
}

impl RecordedRequest {
    /// Parse the recorded body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a buffered response (any status)
    Success(Response),
    /// Fail before a response is received
    Error(HttpError),
    /// Return a stream of bytes
    Stream(Vec<Bytes>),
    /// Return some chunks, then fail mid-stream
    BrokenStream(Vec<Bytes>, HttpError),
}

impl MockResponse {
    /// Buffered JSON response with the given status.
    pub fn json(status: u16, body: &str) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(body.to_string())))
    }

    /// SSE body split into the given chunks.
    pub fn sse(chunks: &[&str]) -> Self {
        MockResponse::Stream(
            chunks
                .iter()
                .map(|chunk| Bytes::from(chunk.to_string()))
                .collect(),
        )
    }
}

/// Mock HTTP client for testing.
///
/// Responses are matched by exact URL, then the default response is used.
/// Exact matching matters here: `B/run` is a prefix of `B/run_sse`.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Configured responses by URL
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a specific URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        lock(&self.responses).insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// URLs of all recorded requests, in call order.
    pub fn requested_urls(&self) -> Vec<String> {
        lock(&self.requests).iter().map(|r| r.url.clone()).collect()
    }

    fn record_request(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        body: Option<String>,
        timeout: Duration,
    ) {
        lock(&self.requests).push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
            timeout,
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        if let Some(response) = lock(&self.responses).get(url) {
            return Some(response.clone());
        }
        lock(&self.default_response).clone()
    }

    fn buffered(&self, url: &str) -> Result<Response, HttpError> {
        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Stream(_)) | Some(MockResponse::BrokenStream(..)) => Err(
                HttpError::Other("Stream response on non-stream request".to_string()),
            ),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &Headers,
        timeout: Duration,
    ) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None, timeout);
        self.buffered(url)
    }

    async fn post(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
        timeout: Duration,
    ) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()), timeout);
        self.buffered(url)
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
        timeout: Duration,
    ) -> Result<ByteStream, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()), timeout);

        match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => {
                Ok(Box::pin(futures::stream::iter(
                    chunks.into_iter().map(Ok::<Bytes, HttpError>),
                )))
            }
            Some(MockResponse::BrokenStream(chunks, err)) => {
                let items = chunks
                    .into_iter()
                    .map(Ok::<Bytes, HttpError>)
                    .chain(std::iter::once(Err(err)));
                Ok(Box::pin(futures::stream::iter(items)))
            }
            // Mirrors the production adapter: a non-2xx status never yields a stream.
            Some(MockResponse::Success(response)) if !response.is_success() => {
                Err(HttpError::ServerError {
                    status: response.status,
                    message: response.text_lossy(),
                })
            }
            Some(MockResponse::Success(response)) => {
                Ok(Box::pin(futures::stream::iter(vec![Ok::<Bytes, HttpError>(
                    response.body,
                )])))
            }
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_exact_match_does_not_leak_to_longer_urls() {
        let client = MockHttpClient::new();
        client.set_response("http://svc/run", MockResponse::json(200, "[]"));

        let result = client
            .post("http://svc/run_sse", "{}", &Headers::new(), TIMEOUT)
            .await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_post_records_body_and_timeout() {
        let client = MockHttpClient::new();
        client.set_response("http://svc/chat", MockResponse::json(200, r#"{"text":"hi"}"#));

        let response = client
            .post("http://svc/chat", r#"{"message":"x"}"#, &Headers::new(), TIMEOUT)
            .await
            .unwrap();
        assert_eq!(response.status, 200);

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].timeout, TIMEOUT);
        assert_eq!(requests[0].json_body().unwrap()["message"], "x");
    }

    #[tokio::test]
    async fn test_default_response() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Error(HttpError::Timeout("slow".into())));

        let result = client.get("http://svc/health", &Headers::new(), TIMEOUT).await;
        assert_eq!(result.unwrap_err(), HttpError::Timeout("slow".into()));
    }

    #[tokio::test]
    async fn test_post_stream_with_chunks() {
        let client = MockHttpClient::new();
        client.set_response("http://svc/run_sse", MockResponse::sse(&["a", "b", "c"]));

        let mut stream = client
            .post_stream("http://svc/run_sse", "{}", &Headers::new(), TIMEOUT)
            .await
            .unwrap();

        let mut chunks = Vec::new();
        while let Some(result) = stream.next().await {
            chunks.push(result.unwrap());
        }
        assert_eq!(chunks, vec![Bytes::from("a"), Bytes::from("b"), Bytes::from("c")]);
    }

    #[tokio::test]
    async fn test_post_stream_broken() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://svc/run_sse",
            MockResponse::BrokenStream(vec![Bytes::from("a")], HttpError::Io("reset".into())),
        );

        let stream = client
            .post_stream("http://svc/run_sse", "{}", &Headers::new(), TIMEOUT)
            .await
            .unwrap();
        let items: Vec<_> = stream.collect().await;
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert_eq!(items[1], Err(HttpError::Io("reset".into())));
    }

    #[tokio::test]
    async fn test_post_stream_error_status() {
        let client = MockHttpClient::new();
        client.set_response("http://svc/run_sse", MockResponse::json(404, "Not Found"));

        let result = client
            .post_stream("http://svc/run_sse", "{}", &Headers::new(), TIMEOUT)
            .await;
        match result {
            Err(HttpError::ServerError { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            _ => panic!("Expected ServerError"),
        }
    }
}
