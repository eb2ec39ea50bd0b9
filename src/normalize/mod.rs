//! Response normalization.
//!
//! Agent services answer in several shapes: an event log (list), a flat or
//! nested object, or a bare string. [`normalize`] folds all of them into one
//! [`NormalizedMessage`]. It never fails: a fault while processing becomes an
//! `Error`-status message carrying the fault description, with the original
//! payload preserved.

mod events;
mod object;

use serde_json::Value;
use thiserror::Error;

use crate::models::NormalizedMessage;

/// Prefix of the text shown when a payload could not be processed.
pub const NORMALIZE_ERROR_PREFIX: &str = "Error processing response";

/// Why a payload could not be processed.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// An event's `content` or `parts` had an unusable type.
    #[error("event {index}: {reason}")]
    MalformedEvent { index: usize, reason: String },

    /// A tool part's `functionCall` / `functionResponse` was not an object.
    #[error("event {index}: {field} is not an object")]
    MalformedToolPart { index: usize, field: &'static str },

    /// Rendering the fallback JSON text failed.
    #[error("could not render payload: {0}")]
    Render(#[from] serde_json::Error),
}

/// Normalize any payload. Total: never panics, never returns an error.
pub fn normalize(payload: &Value) -> NormalizedMessage {
    match try_normalize(payload) {
        Ok(message) => message,
        Err(err) => {
            tracing::error!(error = %err, "Failed to normalize agent response");
            NormalizedMessage::error(
                format!("{}: {}", NORMALIZE_ERROR_PREFIX, err),
                payload.clone(),
            )
        }
    }
}

/// Normalize a payload, reporting faults instead of folding them in.
pub fn try_normalize(payload: &Value) -> Result<NormalizedMessage, NormalizeError> {
    let mut message = normalize_shape(payload)?;
    message.final_text = message.final_text.trim().to_string();
    Ok(message)
}

/// Shape dispatch without the final trim; nested `events` recurse here.
fn normalize_shape(payload: &Value) -> Result<NormalizedMessage, NormalizeError> {
    let mut message = NormalizedMessage::empty(payload.clone());

    match payload {
        Value::Array(items) => events::collect(items, &mut message)?,
        Value::Object(map) => object::collect(map, &mut message)?,
        Value::String(text) => message.final_text = text.clone(),
        other => message.final_text = stringify(other),
    }

    Ok(message)
}

/// Truthiness as dynamic services use it: empty strings, zero, `false`,
/// `null` and empty containers count as absent.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Strings verbatim, anything else as compact JSON.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
