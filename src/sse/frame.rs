//! `data: ` line decoding.
//!
//! The agent service frames every event as `data: <json>` followed by a
//! blank line. Only the data lines matter: `event:`, `id:`, comments and
//! blank separators are ignored, and a data line that is not valid JSON is
//! dropped without ending the stream.

use serde_json::Value;

/// Literal prefix of an event line.
pub const DATA_PREFIX: &str = "data: ";

/// Classification of one SSE line.
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// A decodable `data: ` line
    Event(Value),
    /// A `data: ` line whose payload is not JSON
    Malformed(String),
    /// Anything else: blank separators, comments, other fields
    Ignored,
}

/// Classify a single line (without its trailing newline).
pub fn parse_sse_line(line: &str) -> SseLine {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return SseLine::Ignored;
    };

    match serde_json::from_str(payload) {
        Ok(value) => SseLine::Event(value),
        Err(_) => SseLine::Malformed(payload.to_string()),
    }
}

/// Line-at-a-time SSE decoder.
///
/// Holds no partial-line state: callers hand it complete lines. It only
/// counts what it has seen, which the streaming transport logs.
#[derive(Debug, Default)]
pub struct SseFrameParser {
    events: usize,
    skipped: usize,
}

impl SseFrameParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line, returning the decoded event if the line carried one.
    pub fn feed_line(&mut self, line: &str) -> Option<Value> {
        match parse_sse_line(line) {
            SseLine::Event(value) => {
                self.events += 1;
                Some(value)
            }
            SseLine::Malformed(payload) => {
                self.skipped += 1;
                tracing::debug!(payload = %payload, "Skipping malformed SSE data line");
                None
            }
            SseLine::Ignored => None,
        }
    }

    /// Number of events decoded so far.
    pub fn events_decoded(&self) -> usize {
        self.events
    }

    /// Number of `data: ` lines dropped for invalid JSON.
    pub fn lines_skipped(&self) -> usize {
        self.skipped
    }
}

/// Lazily decode events from a sequence of lines.
pub fn parse_lines<I, S>(lines: I) -> impl Iterator<Item = Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = SseFrameParser::new();
    lines
        .into_iter()
        .filter_map(move |line| parser.feed_line(line.as_ref()))
}
