//! Event-log payloads: a list of agent events, each possibly carrying
//! `content: {role, parts: [...]}`.
//!
//! Model text is gathered only from `role == "model"` events; tool calls and
//! tool responses are gathered from every event regardless of role.

use serde_json::{Map, Value};

use super::{stringify, NormalizeError};
use crate::models::{NormalizedMessage, ToolCall, ToolResponse};

const UNKNOWN_TOOL: &str = "unknown";

pub(super) fn collect(items: &[Value], message: &mut NormalizedMessage) -> Result<(), NormalizeError> {
    message.events = items.to_vec();

    for (index, event) in items.iter().enumerate() {
        let Some(event) = event.as_object() else {
            continue;
        };
        let Some(parts) = event_parts(index, event)? else {
            continue;
        };

        if is_model_content(event) {
            for part in parts.iter().filter_map(Value::as_object) {
                if let Some(text) = part.get("text").filter(|t| super::is_truthy(t)) {
                    message.final_text.push_str(&stringify(text));
                    message.final_text.push(' ');
                }
            }
        }

        for part in parts.iter().filter_map(Value::as_object) {
            if let Some(call) = part.get("functionCall") {
                let call = tool_object(index, call, "functionCall")?;
                message.tool_calls.push(ToolCall {
                    name: tool_name(call),
                    args: call.get("args").cloned().unwrap_or_else(empty_object),
                });
            } else if let Some(response) = part.get("functionResponse") {
                let response = tool_object(index, response, "functionResponse")?;
                message.tool_responses.push(ToolResponse {
                    name: tool_name(response),
                    response: response
                        .get("response")
                        .cloned()
                        .unwrap_or_else(empty_object),
                });
            }
        }
    }

    Ok(())
}

/// `content.parts` of an event; `None` when the event has no content.
///
/// String and object `parts` iterate without yielding any text or tool
/// part, so they count as empty. Scalars cannot be iterated at all.
fn event_parts(
    index: usize,
    event: &Map<String, Value>,
) -> Result<Option<&Vec<Value>>, NormalizeError> {
    let content = match event.get("content") {
        None => return Ok(None),
        Some(Value::Object(content)) => content,
        Some(other) => {
            return Err(NormalizeError::MalformedEvent {
                index,
                reason: format!("content is {}, expected an object", kind_of(other)),
            })
        }
    };

    match content.get("parts") {
        None => Ok(None),
        Some(Value::Array(parts)) => Ok(Some(parts)),
        Some(Value::String(_)) | Some(Value::Object(_)) => Ok(None),
        Some(other) => Err(NormalizeError::MalformedEvent {
            index,
            reason: format!("content.parts is {}, expected a list", kind_of(other)),
        }),
    }
}

fn is_model_content(event: &Map<String, Value>) -> bool {
    event
        .get("content")
        .and_then(|content| content.get("role"))
        .and_then(Value::as_str)
        == Some("model")
}

fn tool_object<'a>(
    index: usize,
    value: &'a Value,
    field: &'static str,
) -> Result<&'a Map<String, Value>, NormalizeError> {
    value
        .as_object()
        .ok_or(NormalizeError::MalformedToolPart { index, field })
}

fn tool_name(tool: &Map<String, Value>) -> String {
    match tool.get("name") {
        None | Some(Value::Null) => UNKNOWN_TOOL.to_string(),
        Some(name) => stringify(name),
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
