use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of processing one response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Ok,
    Error,
}

/// A tool invocation reported by the agent (`functionCall` part).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub args: Value,
}

/// A tool result reported by the agent (`functionResponse` part).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResponse {
    pub name: String,
    pub response: Value,
}

/// Canonical form of an agent reply, whatever shape the service returned.
///
/// `final_text` is always defined (possibly empty). Tool calls and responses
/// keep the order in which they appeared in the payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedMessage {
    pub final_text: String,
    pub tool_calls: Vec<ToolCall>,
    pub tool_responses: Vec<ToolResponse>,
    /// Original events, kept for debugging.
    pub events: Vec<Value>,
    pub status: MessageStatus,
    pub raw_response: Value,
}

impl NormalizedMessage {
    /// An empty successful message wrapping `raw_response`.
    pub fn empty(raw_response: Value) -> Self {
        Self {
            final_text: String::new(),
            tool_calls: Vec::new(),
            tool_responses: Vec::new(),
            events: Vec::new(),
            status: MessageStatus::Ok,
            raw_response,
        }
    }

    /// An error message: `text` is shown to the user, `raw_response` is kept.
    pub fn error(text: impl Into<String>, raw_response: Value) -> Self {
        Self {
            final_text: text.into(),
            status: MessageStatus::Error,
            ..Self::empty(raw_response)
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == MessageStatus::Error
    }

    /// Names of the tools the agent called, in call order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tool_calls.iter().map(|call| call.name.as_str()).collect()
    }
}
