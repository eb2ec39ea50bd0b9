//! Mock implementations for test fixtures.
//!
//! Re-exports the mock HTTP client from `adk_chat::adapters::mock` and adds
//! a small builder for common response layouts.

pub use adk_chat::adapters::mock::{MockHttpClient, MockResponse};
pub use adk_chat::traits::{Headers, HttpClient, HttpError, Response};

use bytes::Bytes;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

#[allow(dead_code)]
impl MockHttpConfig {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a buffered JSON response.
    pub fn with_json_response(self, url: &str, status: u16, json: &str) -> Self {
        self.client.set_response(url, MockResponse::json(status, json));
        self
    }

    /// Configures an SSE body delivered in the given chunks.
    pub fn with_sse_response<S: AsRef<str>>(self, url: &str, chunks: &[S]) -> Self {
        let chunks = chunks
            .iter()
            .map(|chunk| Bytes::from(chunk.as_ref().to_string()))
            .collect();
        self.client.set_response(url, MockResponse::Stream(chunks));
        self
    }

    /// Configures a failure before any response arrives.
    pub fn with_error(self, url: &str, error: HttpError) -> Self {
        self.client.set_response(url, MockResponse::Error(error));
        self
    }

    /// Configures the status (with a short body) for unmatched URLs.
    pub fn with_default_status(self, status: u16) -> Self {
        self.client.set_default_response(MockResponse::Success(Response::new(
            status,
            Bytes::from(format!("status {}", status)),
        )));
        self
    }

    /// Configures a connection failure for unmatched URLs.
    pub fn with_default_error(self, error: HttpError) -> Self {
        self.client.set_default_response(MockResponse::Error(error));
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
