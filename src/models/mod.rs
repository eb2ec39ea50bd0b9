//! Data model: outgoing requests, normalized replies, conversation history.

mod message;
mod normalized;
mod request;

pub use message::{
    ConversationMessage, MessageRole, ALL_ENDPOINTS_FAILED_TEXT, EMPTY_REPLY_TEXT,
};
pub use normalized::{MessageStatus, NormalizedMessage, ToolCall, ToolResponse};
pub use request::{
    ChatRequest, NewMessage, OutgoingMessage, RootRequest, RunRequest, TextPart,
    DEFAULT_APP_NAME,
};
