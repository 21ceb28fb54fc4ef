//! Shutdown coordination for extension sessions.

use std::sync::Arc;

use tokio::sync::watch;

/// Cloneable trigger for stopping a session's read loop.
///
/// The session checks the flag between frames, so an in-flight request is
/// always answered before the loop exits.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    /// Create a handle plus the receiver the session's loop watches.
    pub(crate) fn new() -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (Self { tx: Arc::new(tx) }, rx)
    }

    /// Request shutdown. Idempotent; later calls are harmless.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }

    /// Whether shutdown has been requested.
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}
