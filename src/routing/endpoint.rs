//! Endpoint keys and handler types.

use crate::http::{Request, Response};

/// Error type handlers may return; converted to a 500-class reply at the
/// session boundary.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result of one handler invocation.
pub type HandlerResult = Result<(), HandlerError>;

/// Boxed endpoint callback. Handlers run synchronously on the session's
/// read loop and must invoke exactly one terminal response operation.
pub type Handler = Box<dyn Fn(&Request, &mut Response) -> HandlerResult + Send + Sync>;

/// Composite routing key: `verb + " " + path`, matched exactly.
///
/// No case folding and no path cleanup happen here; what the daemon sends
/// is what must have been registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointKey(String);

impl EndpointKey {
    /// Compose the key for a verb/path pair.
    pub fn new(verb: &str, path: &str) -> Self {
        Self(format!("{} {}", verb, path))
    }

    /// The composed key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
