//! Mercury Extension Driver
//!
//! SDK for out-of-process Mercury extensions: connect to the daemon's
//! extension socket, bind endpoint handlers, and serve forwarded requests
//! over the private wire protocol.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │              EXTENSION PROCESS               │
//!                        │                                              │
//!     Request frame      │  ┌─────────┐   ┌─────────┐   ┌────────────┐  │
//!     ───────────────────┼─▶│   net   │──▶│  http   │──▶│  routing   │  │
//!     (Mercury daemon)   │  │ session │   │ request │   │   table    │  │
//!                        │  └─────────┘   └─────────┘   └─────┬──────┘  │
//!                        │                                    │         │
//!                        │                                    ▼         │
//!     Reply frame        │  ┌─────────┐   ┌─────────┐   ┌────────────┐  │
//!     ◀──────────────────┼──│   net   │◀──│  http   │◀──│  endpoint  │  │
//!                        │  │  frame  │   │response │   │  handler   │  │
//!                        │  └─────────┘   └─────────┘   └────────────┘  │
//!                        │                                              │
//!                        │  ┌────────────────────────────────────────┐  │
//!                        │  │          Cross-Cutting Concerns        │  │
//!                        │  │   config      lifecycle   observability│  │
//!                        │  └────────────────────────────────────────┘  │
//!                        └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::ExtensionConfig;
pub use http::{Request, Response};
pub use lifecycle::shutdown::ShutdownHandle;
pub use net::session::{connect, Session, SessionError};
pub use routing::endpoint::{HandlerError, HandlerResult};
