use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::normalized::{MessageStatus, NormalizedMessage, ToolCall, ToolResponse};

/// Shown when the agent finished without saying anything.
pub const EMPTY_REPLY_TEXT: &str = "Task completed.";

/// Shown when every transport failed.
pub const ALL_ENDPOINTS_FAILED_TEXT: &str =
    "All endpoints failed. Please check your configuration and try again.";

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One entry of the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default)]
    pub tool_responses: Vec<ToolResponse>,
    /// Label of the transport that produced this reply.
    #[serde(default)]
    pub endpoint_used: Option<String>,
    #[serde(default)]
    pub status: MessageStatus,
    #[serde(default)]
    pub raw_response: Option<Value>,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            tool_calls: Vec::new(),
            tool_responses: Vec::new(),
            endpoint_used: None,
            status: MessageStatus::Ok,
            raw_response: None,
        }
    }

    /// Assistant reply built from a normalized response.
    pub fn assistant(normalized: &NormalizedMessage, endpoint_used: impl Into<String>) -> Self {
        let content = if normalized.final_text.is_empty() {
            EMPTY_REPLY_TEXT.to_string()
        } else {
            normalized.final_text.clone()
        };

        Self {
            role: MessageRole::Assistant,
            content,
            timestamp: Utc::now(),
            tool_calls: normalized.tool_calls.clone(),
            tool_responses: normalized.tool_responses.clone(),
            endpoint_used: Some(endpoint_used.into()),
            status: normalized.status,
            raw_response: Some(normalized.raw_response.clone()),
        }
    }

    /// Assistant reply recorded when no transport produced a response.
    pub fn transport_failure() -> Self {
        Self {
            role: MessageRole::Assistant,
            content: ALL_ENDPOINTS_FAILED_TEXT.to_string(),
            timestamp: Utc::now(),
            tool_calls: Vec::new(),
            tool_responses: Vec::new(),
            endpoint_used: None,
            status: MessageStatus::Error,
            raw_response: None,
        }
    }

    /// `Tools used: a, b`, or `None` when no tool was called.
    pub fn tools_summary(&self) -> Option<String> {
        if self.tool_calls.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.tool_calls.iter().map(|c| c.name.as_str()).collect();
        Some(format!("Tools used: {}", names.join(", ")))
    }
}
