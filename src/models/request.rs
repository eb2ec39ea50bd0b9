use serde::Serialize;

/// App name used when none is configured.
pub const DEFAULT_APP_NAME: &str = "agent";

/// One user message on its way to the agent service.
///
/// Built fresh for every send and never mutated after dispatch. Only the new
/// text travels; the service keeps conversation memory keyed by session id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub user_id: String,
    pub session_id: Option<String>,
    pub app_name: String,
}

impl OutgoingMessage {
    pub fn new(
        text: impl Into<String>,
        user_id: impl Into<String>,
        session_id: Option<String>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            user_id: user_id.into(),
            session_id,
            app_name: app_name.into(),
        }
    }

    /// Session id, treating an empty string as absent.
    pub fn session(&self) -> Option<&str> {
        self.session_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// A single text part of a message.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TextPart {
    pub text: String,
}

/// `newMessage` of a run request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewMessage {
    pub role: &'static str,
    pub parts: Vec<TextPart>,
}

/// Body for `POST /run` and `POST /run_sse`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
    pub new_message: NewMessage,
}

impl RunRequest {
    /// Build a run body. The run endpoints need a session id, so a
    /// sessionless message gets a throwaway `temp-session-<unix secs>` id.
    pub fn from_message(message: &OutgoingMessage) -> Self {
        let session_id = message
            .session()
            .map(str::to_string)
            .unwrap_or_else(|| format!("temp-session-{}", chrono::Utc::now().timestamp()));

        Self {
            app_name: message.app_name.clone(),
            user_id: message.user_id.clone(),
            session_id,
            new_message: NewMessage {
                role: "user",
                parts: vec![TextPart {
                    text: message.text.clone(),
                }],
            },
        }
    }
}

/// Body for `POST /chat`. Identity fields are omitted when unknown.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn from_message(message: &OutgoingMessage) -> Self {
        Self {
            message: message.text.clone(),
            user_id: Some(message.user_id.clone()).filter(|id| !id.is_empty()),
            session_id: message.session().map(str::to_string),
        }
    }
}

/// Body for `POST /`. `session_id` is serialized as `null` when absent.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RootRequest {
    pub query: String,
    pub user_id: String,
    pub session_id: Option<String>,
}

impl RootRequest {
    pub fn from_message(message: &OutgoingMessage) -> Self {
        Self {
            query: message.text.clone(),
            user_id: message.user_id.clone(),
            session_id: message.session().map(str::to_string),
        }
    }
}
