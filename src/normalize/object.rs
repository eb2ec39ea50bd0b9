//! Object payloads: flat text fields, nested `content`, embedded `events`.

use serde_json::{Map, Value};

use super::{is_truthy, stringify, try_normalize, NormalizeError};
use crate::models::NormalizedMessage;

/// Direct text fields, probed in this order; the first truthy one wins.
pub const TEXT_FIELDS: [&str; 5] = ["text", "response", "message", "output", "result"];

/// Transport metadata dropped before rendering an object as text.
pub const METADATA_FIELDS: [&str; 4] = ["timestamp", "request_id", "metadata", "status"];

pub(super) fn collect(
    map: &Map<String, Value>,
    message: &mut NormalizedMessage,
) -> Result<(), NormalizeError> {
    if let Some(text) = TEXT_FIELDS
        .iter()
        .filter_map(|field| map.get(*field))
        .find(|value| is_truthy(value))
    {
        message.final_text = stringify(text);
    }

    match map.get("content") {
        Some(Value::String(text)) => message.final_text = text.clone(),
        Some(Value::Object(content)) => {
            if let Some(text) = content.get("text") {
                message.final_text = match text {
                    Value::Null => String::new(),
                    other => stringify(other),
                };
            }
        }
        _ => {}
    }

    if let Some(events) = map.get("events") {
        message.events = match events {
            Value::Array(items) => items.clone(),
            other => vec![other.clone()],
        };

        let nested = try_normalize(events)?;
        if !nested.final_text.is_empty() {
            message.final_text = nested.final_text;
        }
        message.tool_calls.extend(nested.tool_calls);
        message.tool_responses.extend(nested.tool_responses);
    }

    if message.final_text.is_empty() {
        let cleaned: Map<String, Value> = map
            .iter()
            .filter(|(key, _)| !METADATA_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        message.final_text = serde_json::to_string_pretty(&Value::Object(cleaned))?;
    }

    Ok(())
}
