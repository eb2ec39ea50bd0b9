//! Common test utilities for integration tests.
//!
//! Shared fixtures: agent payloads in the shapes services actually return,
//! and builders for sessions wired to a [`MockHttpClient`].
//!
//! # Example
//!
//! ```ignore
//! use common::{session_with, MockHttpConfig};
//!
//! let mock = MockHttpConfig::new().with_default_status(404).build();
//! let mut session = session_with(&mock);
//! ```

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;

use adk_chat::config::ClientConfig;
use adk_chat::session::ConversationSession;
use adk_chat::traits::HttpClient;
use serde_json::{json, Value};

/// Base URL used by every mock-backed test.
pub const TEST_BASE_URL: &str = "http://agent.test";

/// URL of `path` under [`TEST_BASE_URL`].
pub fn url(path: &str) -> String {
    format!("{}{}", TEST_BASE_URL, path)
}

/// Config pointing at [`TEST_BASE_URL`].
pub fn test_config() -> ClientConfig {
    ClientConfig::default()
        .with_service_url(TEST_BASE_URL)
        .with_app_name("website_agent")
}

/// A session over `mock` with [`test_config`].
pub fn session_with(mock: &MockHttpClient) -> ConversationSession {
    let http: Arc<dyn HttpClient> = Arc::new(mock.clone());
    ConversationSession::from_config(http, &test_config()).expect("test config is valid")
}

/// Event log of an agent that lists services, then answers.
pub fn services_event_log() -> Value {
    json!([
        {"author": "website_agent", "content": {"role": "model", "parts": [
            {"functionCall": {"name": "list_services", "args": {}}}
        ]}},
        {"author": "website_agent", "content": {"role": "user", "parts": [
            {"functionResponse": {"name": "list_services", "response": {"services": [
                {"id": "web", "name": "Web Development", "description": "Sites and apps"},
                {"id": "seo", "name": "SEO", "description": "Search visibility"}
            ]}}}
        ]}},
        {"author": "website_agent", "content": {"role": "model", "parts": [
            {"text": "We offer Web Development"},
            {"text": "and SEO."}
        ]}}
    ])
}

/// The same events as SSE frames, one chunk per event.
pub fn services_sse_chunks() -> Vec<String> {
    services_event_log()
        .as_array()
        .into_iter()
        .flatten()
        .map(|event| format!("data: {}\n\n", event))
        .collect()
}
