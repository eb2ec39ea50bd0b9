//! Turning a response byte stream into SSE events.

use futures::Stream;
use futures_util::stream;
use futures_util::StreamExt;
use serde_json::Value;

use super::frame::SseFrameParser;
use crate::traits::{ByteStream, HttpError};

/// Split complete lines out of `buffer`, leaving any unterminated tail.
///
/// Lines are decoded only once complete, so a multi-byte character split
/// across two network chunks survives intact.
fn drain_lines(buffer: &mut Vec<u8>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
        let raw: Vec<u8> = buffer.drain(..=pos).collect();
        let line = String::from_utf8_lossy(&raw[..raw.len() - 1]);
        lines.push(line.trim_end_matches('\r').to_string());
    }
    lines
}

struct DecodeState {
    bytes: ByteStream,
    parser: SseFrameParser,
    buffer: Vec<u8>,
    pending: std::collections::VecDeque<String>,
    finished: bool,
}

/// Decode a raw SSE body into JSON events, in arrival order.
///
/// Transport errors are passed through and end the stream. Whatever is left
/// in the buffer when the body closes is treated as a final line.
pub fn decode_event_stream(bytes: ByteStream) -> impl Stream<Item = Result<Value, HttpError>> {
    let state = DecodeState {
        bytes,
        parser: SseFrameParser::new(),
        buffer: Vec::new(),
        pending: Default::default(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            while let Some(line) = state.pending.pop_front() {
                if let Some(event) = state.parser.feed_line(&line) {
                    return Some((Ok(event), state));
                }
            }

            if state.finished {
                tracing::debug!(
                    events = state.parser.events_decoded(),
                    skipped = state.parser.lines_skipped(),
                    "SSE body closed"
                );
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    state.buffer.extend_from_slice(&chunk);
                    let lines = drain_lines(&mut state.buffer);
                    state.pending.extend(lines);
                }
                Some(Err(e)) => {
                    state.finished = true;
                    state.pending.clear();
                    return Some((Err(e), state));
                }
                None => {
                    state.finished = true;
                    if !state.buffer.is_empty() {
                        let tail = String::from_utf8_lossy(&state.buffer).into_owned();
                        state.buffer.clear();
                        state.pending.push_back(tail.trim_end_matches('\r').to_string());
                    }
                }
            }
        }
    })
}

/// Collect every event of an SSE body, failing on the first transport error.
pub async fn collect_events(bytes: ByteStream) -> Result<Vec<Value>, HttpError> {
    let events = decode_event_stream(bytes);
    futures_util::pin_mut!(events);

    let mut collected = Vec::new();
    while let Some(item) = events.next().await {
        collected.push(item?);
    }
    Ok(collected)
}
