//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (session_id, verb, path)
//!
//! Consumers:
//!     → stdout via the fmt layer (extension operator's terminal or
//!       supervisor log)
//! ```
//!
//! # Design Decisions
//! - Handler failures are an operator concern: they land in the log, never
//!   on the wire to the daemon
//! - `RUST_LOG` wins over the configured default filter
//! - Per-frame events log at debug so an idle extension stays quiet at the
//!   default level

pub mod logging;
