//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Init logging → Connect session → Bind endpoints → run()
//!
//! Shutdown:
//!     ShutdownHandle::trigger() (operator, Ctrl-C task, supervisor)
//!     → session read loop observes the flag between frames
//!     → in-flight reply finishes → socket drops → run() returns
//! ```
//!
//! # Design Decisions
//! - Closing the socket or triggering shutdown are the only cancellation
//!   primitives; there is no per-request cancellation
//! - A request already being served always gets its reply before the loop
//!   exits

pub mod shutdown;

pub use shutdown::ShutdownHandle;
