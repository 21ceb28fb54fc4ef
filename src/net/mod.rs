//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Session::connect (persistent TCP to the daemon's extension socket)
//!     → session.rs read loop: await one full frame
//!     → frame.rs (length-delimited framing)
//!     → http decode → routing dispatch → http serialize
//!     → frame.rs (write reply frame)
//!     → loop for the next frame
//!
//! Session lifetime:
//!     Connect → Serve (strictly sequential) → daemon close or shutdown
//! ```
//!
//! # Design Decisions
//! - Half-duplex: one outstanding request per session; the daemon waits
//!   for the reply before sending the next frame
//! - The socket and the routing table are session-local; concurrent
//!   sessions share nothing
//! - Connection failures are fatal to the session and surface to the
//!   caller; any retry policy belongs to the supervising process

pub mod frame;
pub mod session;

pub use frame::FrameError;
pub use session::{connect, Session, SessionError, SessionId};
