//! Trait abstractions for external dependencies.
//!
//! The agent service is only reached through these traits, which lets the
//! transports and the conversation session run against mocks in tests.

pub mod http;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
