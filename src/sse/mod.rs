//! Server-Sent Events decoding for the streaming run transport.
//!
//! - [`frame`] decodes individual `data: ` lines
//! - [`stream`] splits a response byte stream into lines and feeds them through

pub mod frame;
pub mod stream;

pub use frame::{parse_lines, parse_sse_line, SseFrameParser, SseLine, DATA_PREFIX};
pub use stream::{collect_events, decode_event_stream};
