//! Tracing setup for the binary.
//!
//! Logs go to stderr so they never interleave with the chat transcript on
//! stdout. `RUST_LOG` overrides the default filter.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn,adk_chat=info";

/// Install the global subscriber. Later calls do nothing.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        );

        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("[adk-chat] Failed to set tracing subscriber: {}", e);
        }
    });
}
