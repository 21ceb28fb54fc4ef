//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ExtensionConfig (validated, immutable)
//!     → handed to Session::connect
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a session keeps the values it was
//!   connected with
//! - All fields have defaults so `connect(host, port)` works with no file
//!   at all
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every violation at once

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ExtensionConfig;
pub use schema::DaemonConfig;
