//! Extension session: one socket, one routing table, one serve loop.
//!
//! # Responsibilities
//! - Establish and own the persistent TCP connection to the daemon
//! - Expose the endpoint registration API (`bind`, `get/post/put/delete`)
//! - Drive the decode → dispatch → encode cycle, one frame at a time
//! - Guarantee exactly one reply frame per request, whatever the handler does
//!
//! # Design Decisions
//! - The loop is strictly sequential; no locking is needed because no two
//!   responses are ever in flight on one session
//! - Decode failures answer 400 and keep serving; handler failures answer
//!   500; only socket-level problems end the session
//! - Reply writes run under a timeout so a wedged daemon socket cannot
//!   hang the session permanently

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::watch;

use crate::config::schema::ExtensionConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::http::{Request, Response};
use crate::lifecycle::shutdown::ShutdownHandle;
use crate::net::frame::{self, FrameError};
use crate::routing::router::{Dispatch, Router};
use crate::routing::HandlerResult;

/// Global atomic counter for session IDs.
/// Relaxed ordering is sufficient since we only need uniqueness.
static SESSION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier for a session, for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    fn new() -> Self {
        Self(SESSION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Error type for session establishment and the serve loop.
#[derive(Debug)]
pub enum SessionError {
    /// The config the session was asked to connect with is unusable.
    Config(Vec<ValidationError>),
    /// The daemon socket could not be reached (refused, timed out, reset
    /// during the handshake).
    Connect(std::io::Error),
    /// Framing broke mid-session: read/write failure or a frame beyond the
    /// configured size limit.
    Frame(FrameError),
    /// A reply frame could not be written within the configured timeout.
    WriteTimeout,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Config(errors) => {
                write!(f, "Invalid session config: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            SessionError::Connect(e) => write!(f, "Failed to reach the daemon: {}", e),
            SessionError::Frame(e) => write!(f, "Session framing failed: {}", e),
            SessionError::WriteTimeout => write!(f, "Timed out writing a reply frame"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<FrameError> for SessionError {
    fn from(e: FrameError) -> Self {
        SessionError::Frame(e)
    }
}

/// Convenience connect with default limits, timeouts, and logging config.
///
/// The entry point extension authors reach for first:
///
/// ```no_run
/// # async fn demo() -> Result<(), mercury_ext::SessionError> {
/// let mut session = mercury_ext::connect("127.0.0.1", 9220).await?;
/// session.get("/ping", |_req, res| {
///     res.json(&serde_json::json!({ "ping": "pong" }))?;
///     Ok(())
/// });
/// session.run().await
/// # }
/// ```
pub async fn connect(host: &str, port: u16) -> Result<Session, SessionError> {
    let mut config = ExtensionConfig::default();
    config.daemon.host = host.to_string();
    config.daemon.port = port;
    Session::connect(&config).await
}

/// One persistent connection to the daemon's extension socket, owning the
/// socket and the endpoint table for its lifetime.
pub struct Session {
    id: SessionId,
    stream: TcpStream,
    peer_addr: SocketAddr,
    router: Router,
    max_frame_bytes: usize,
    write_timeout: Duration,
    shutdown: ShutdownHandle,
    shutdown_rx: watch::Receiver<bool>,
}

impl Session {
    /// Establish the persistent socket described by `config`.
    ///
    /// Connection refused, reset, and timeout all surface as
    /// [`SessionError::Connect`]; nothing is swallowed or retried here.
    pub async fn connect(config: &ExtensionConfig) -> Result<Self, SessionError> {
        validate_config(config).map_err(SessionError::Config)?;

        let connect_timeout = Duration::from_secs(config.timeouts.connect_secs);
        let endpoint = (config.daemon.host.as_str(), config.daemon.port);
        let stream = match tokio::time::timeout(connect_timeout, TcpStream::connect(endpoint)).await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(SessionError::Connect(e)),
            Err(_) => {
                return Err(SessionError::Connect(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "connection attempt timed out",
                )))
            }
        };

        // Replies are small and latency-sensitive.
        let _ = stream.set_nodelay(true);

        let peer_addr = stream.peer_addr().map_err(SessionError::Connect)?;
        let (shutdown, shutdown_rx) = ShutdownHandle::new();
        let id = SessionId::new();

        tracing::info!(
            session_id = %id,
            peer = %peer_addr,
            "Connected to daemon extension socket"
        );

        Ok(Self {
            id,
            stream,
            peer_addr,
            router: Router::new(),
            max_frame_bytes: config.limits.max_frame_bytes,
            write_timeout: Duration::from_secs(config.timeouts.write_secs),
            shutdown,
            shutdown_rx,
        })
    }

    /// Register a handler for an arbitrary verb/path pair. Re-registering
    /// the same pair replaces the previous handler.
    pub fn bind<F>(&mut self, verb: &str, path: &str, handler: F)
    where
        F: Fn(&Request, &mut Response) -> HandlerResult + Send + Sync + 'static,
    {
        self.router.bind(verb, path, handler);
    }

    /// Shorthand for `bind("GET", ...)`.
    pub fn get<F>(&mut self, path: &str, handler: F)
    where
        F: Fn(&Request, &mut Response) -> HandlerResult + Send + Sync + 'static,
    {
        self.bind("GET", path, handler);
    }

    /// Shorthand for `bind("POST", ...)`.
    pub fn post<F>(&mut self, path: &str, handler: F)
    where
        F: Fn(&Request, &mut Response) -> HandlerResult + Send + Sync + 'static,
    {
        self.bind("POST", path, handler);
    }

    /// Shorthand for `bind("PUT", ...)`.
    pub fn put<F>(&mut self, path: &str, handler: F)
    where
        F: Fn(&Request, &mut Response) -> HandlerResult + Send + Sync + 'static,
    {
        self.bind("PUT", path, handler);
    }

    /// Shorthand for `bind("DELETE", ...)`.
    pub fn delete<F>(&mut self, path: &str, handler: F)
    where
        F: Fn(&Request, &mut Response) -> HandlerResult + Send + Sync + 'static,
    {
        self.bind("DELETE", path, handler);
    }

    /// This session's log-correlation ID.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Address of the daemon end of the socket.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Number of registered endpoints.
    pub fn endpoints(&self) -> usize {
        self.router.len()
    }

    /// Cloneable handle that stops the serve loop after the in-flight
    /// request, if any, has been answered.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Serve frames until the daemon closes the socket, shutdown is
    /// triggered, or the connection fails.
    ///
    /// Strictly sequential: the next frame is not read until the previous
    /// reply has been written.
    pub async fn run(mut self) -> Result<(), SessionError> {
        tracing::info!(
            session_id = %self.id,
            endpoints = self.router.len(),
            "Session serve loop started"
        );

        loop {
            tokio::select! {
                changed = self.shutdown_rx.changed() => {
                    // A closed channel cannot happen while we hold the
                    // handle, but either way the loop is done.
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        tracing::info!(session_id = %self.id, "Shutdown requested, leaving serve loop");
                        return Ok(());
                    }
                }
                result = frame::read_frame(&mut self.stream, self.max_frame_bytes) => {
                    match result {
                        Ok(Some(payload)) => self.serve_frame(&payload).await?,
                        Ok(None) => {
                            tracing::info!(session_id = %self.id, "Daemon closed the connection");
                            return Ok(());
                        }
                        Err(e) => {
                            tracing::error!(session_id = %self.id, error = %e, "Session read failed");
                            return Err(SessionError::Frame(e));
                        }
                    }
                }
            }
        }
    }

    /// Answer one inbound frame. Exactly one reply frame is written no
    /// matter what decoding or the handler does.
    async fn serve_frame(&mut self, payload: &[u8]) -> Result<(), SessionError> {
        let mut response = Response::new();

        match Request::decode(payload) {
            Ok(request) => {
                tracing::debug!(
                    session_id = %self.id,
                    verb = %request.verb(),
                    path = %request.path(),
                    body_bytes = request.body().len(),
                    "Dispatching request"
                );

                match self.router.dispatch(&request, &mut response) {
                    Dispatch::Handled => {
                        if !response.is_finalized() {
                            tracing::warn!(
                                session_id = %self.id,
                                verb = %request.verb(),
                                path = %request.path(),
                                "Handler returned without finalizing, answering with an empty response"
                            );
                            response.abort();
                        }
                    }
                    Dispatch::NoRoute => {
                        tracing::debug!(
                            session_id = %self.id,
                            verb = %request.verb(),
                            path = %request.path(),
                            "No endpoint bound, answering with an empty response"
                        );
                    }
                    Dispatch::Failed(err) => {
                        // Surfaced to the extension operator; the daemon
                        // only ever sees a well-formed reply.
                        tracing::warn!(
                            session_id = %self.id,
                            verb = %request.verb(),
                            path = %request.path(),
                            error = %err,
                            "Handler failed"
                        );
                        response.finalize_error(500);
                    }
                }
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %self.id,
                    error = %err,
                    frame_bytes = payload.len(),
                    "Undecodable frame, answering 400"
                );
                response.finalize_error(400);
            }
        }

        // Every branch above finalized the response. An unfinalized one
        // would go out as an empty frame, the same bytes as an abort.
        let reply = response.take_frame().unwrap_or_default();

        match tokio::time::timeout(
            self.write_timeout,
            frame::write_frame(&mut self.stream, &reply),
        )
        .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                tracing::error!(session_id = %self.id, error = %e, "Reply write failed");
                Err(SessionError::Frame(e))
            }
            Err(_) => {
                tracing::error!(session_id = %self.id, "Reply write timed out");
                Err(SessionError::WriteTimeout)
            }
        }
    }
}
