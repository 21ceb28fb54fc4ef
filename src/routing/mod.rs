//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Decoded Request (verb, path)
//!     → endpoint.rs (compose the exact-match key)
//!     → router.rs (table lookup)
//!     → Found: invoke handler once with (request, response)
//!     → Not found: abort the response (empty frame, daemon never blocks)
//! ```
//!
//! # Design Decisions
//! - Exact string match on `verb + " " + path` only; no wildcards, no
//!   parameterized paths, no normalization
//! - Last registration for a duplicate key wins
//! - The table lives on the session, one per socket; sessions never share
//!   routing state
//! - Handler failures are returned as values, never thrown past dispatch

pub mod endpoint;
pub mod router;

pub use endpoint::{EndpointKey, Handler, HandlerError, HandlerResult};
pub use router::{Dispatch, Router};
