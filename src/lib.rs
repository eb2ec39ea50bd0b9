//! adk-chat - a chat client for agent services with an unknown HTTP contract
//!
//! A message is offered to four transports in order (`/run_sse`, `/run`,
//! `/chat`, `/`) until one answers; whatever shape comes back is normalized
//! into one [`models::NormalizedMessage`] and revealed through
//! [`presenter::StreamingPresenter`].
//!
//! This library exposes modules for use by the binary and integration tests.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod presenter;
pub mod service;
pub mod session;
pub mod sse;
pub mod traits;
pub mod transport;

pub use config::ClientConfig;
pub use endpoint::ServiceEndpoint;
pub use presenter::{PresentationStep, StreamingPresenter};
pub use session::ConversationSession;
pub use transport::{EndpointFallbackClient, TransportAttemptResult, TransportKind, TransportStrategy};
