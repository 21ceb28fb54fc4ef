//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for an extension process
//! - Seed the filter from config, let `RUST_LOG` override it

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `default_directive` is used when `RUST_LOG` is unset (typically the
/// configured `logging.level`). Call once, before connecting; a second
/// call is ignored rather than panicking so tests can share a process.
pub fn init(default_directive: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        init("info");
        init("debug");
    }
}
