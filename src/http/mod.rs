//! Wire protocol subsystem.
//!
//! # Data Flow
//! ```text
//! Raw frame from the daemon socket
//!     → request.rs (decode: request line, headers, body)
//!     → [routing layer selects a handler]
//!     → response.rs (accumulate status/headers/body, finalize once)
//!     → status.rs (reason phrase for the status line)
//!     → Serialized frame back to the daemon socket
//! ```
//!
//! # Design Decisions
//! - Private frame format, symmetric between request and response: request
//!   line (or status line), header lines, blank line, verbatim body
//! - Bare `\n` line endings, not `\r\n`
//! - Header names uppercase on both sides of the wire

pub mod request;
pub mod response;
pub mod status;

pub use request::{DecodeError, Request};
pub use response::{Response, ResponseError};
