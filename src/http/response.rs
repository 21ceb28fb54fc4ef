//! Response accumulation and serialization.
//!
//! # Responsibilities
//! - Accumulate status, headers, and body while the response is open
//! - Serialize into the exact wire format the daemon expects
//! - Enforce the finalize-once discipline per request
//!
//! # Design Decisions
//! - Two explicit states, `Open` and `Finalized`, as a tagged enum; no
//!   incidental boolean checks
//! - Any operation on a finalized response is rejected with
//!   [`ResponseError::AlreadyFinalized`], never silently ignored
//! - The status line is `<code> <reason> HTTP/1.1`; this ordering is the
//!   fixed wire contract with the daemon, symmetric on both ends

use serde::Serialize;
use thiserror::Error;

use crate::http::status;

/// Misuse of a [`Response`] by a handler.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// A terminal operation already ran; the reply is sealed.
    #[error("response is already finalized")]
    AlreadyFinalized,

    /// The value passed to `json` could not be serialized.
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug)]
enum State {
    Open {
        status: u16,
        headers: Vec<(String, String)>,
    },
    Finalized {
        frame: Option<Vec<u8>>,
    },
}

/// Mutable reply accumulator for one in-flight request.
///
/// Exactly one terminal operation ([`send`](Self::send),
/// [`json`](Self::json), or the session-internal abort) may run per
/// response; it seals the reply and produces the frame the session writes
/// back to the daemon.
#[derive(Debug)]
pub struct Response {
    state: State,
}

impl Response {
    /// Open response with status 200, no headers, empty body.
    pub fn new() -> Self {
        Self {
            state: State::Open {
                status: 200,
                headers: Vec::new(),
            },
        }
    }

    /// Set the status code. May be called repeatedly while open; the last
    /// write wins.
    pub fn status(&mut self, code: u16) -> Result<(), ResponseError> {
        match &mut self.state {
            State::Open { status, .. } => {
                *status = code;
                Ok(())
            }
            State::Finalized { .. } => Err(ResponseError::AlreadyFinalized),
        }
    }

    /// Set a header, overwriting any existing value for the same name.
    /// Names are normalized to uppercase for comparison and output.
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<(), ResponseError> {
        match &mut self.state {
            State::Open { headers, .. } => {
                let name = name.to_uppercase();
                match headers.iter_mut().find(|(n, _)| *n == name) {
                    Some((_, v)) => *v = value.to_string(),
                    None => headers.push((name, value.to_string())),
                }
                Ok(())
            }
            State::Finalized { .. } => Err(ResponseError::AlreadyFinalized),
        }
    }

    /// Terminal: set the body and seal the response.
    pub fn send(&mut self, body: &str) -> Result<(), ResponseError> {
        match &self.state {
            State::Open { status, headers } => {
                let frame = serialize(*status, headers, body);
                self.state = State::Finalized { frame: Some(frame) };
                Ok(())
            }
            State::Finalized { .. } => Err(ResponseError::AlreadyFinalized),
        }
    }

    /// Terminal: serialize `value` as the JSON body, with the content type
    /// header set accordingly.
    pub fn json<T: Serialize>(&mut self, value: &T) -> Result<(), ResponseError> {
        if self.is_finalized() {
            return Err(ResponseError::AlreadyFinalized);
        }
        let body = serde_json::to_string(value)?;
        self.set_header("Content-Type", "application/json")?;
        self.send(&body)
    }

    /// Terminal, session-internal: seal with a completely empty frame.
    ///
    /// Used when no endpoint matches, or when a handler returns without
    /// finalizing. No-op if the response is already sealed.
    pub(crate) fn abort(&mut self) {
        if let State::Open { .. } = self.state {
            self.state = State::Finalized {
                frame: Some(Vec::new()),
            };
        }
    }

    /// Terminal, session-internal: seal with the given status, no headers,
    /// empty body. Anything the handler accumulated is discarded.
    pub(crate) fn finalize_error(&mut self, code: u16) {
        if let State::Open { .. } = self.state {
            self.state = State::Finalized {
                frame: Some(serialize(code, &[], "")),
            };
        }
    }

    /// Whether a terminal operation has run.
    pub fn is_finalized(&self) -> bool {
        matches!(self.state, State::Finalized { .. })
    }

    /// Hand the serialized frame to the write path. Yields the bytes at
    /// most once; the session owns the single socket write per request.
    pub(crate) fn take_frame(&mut self) -> Option<Vec<u8>> {
        match &mut self.state {
            State::Finalized { frame } => frame.take(),
            State::Open { .. } => None,
        }
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the wire form: status line, header lines, blank line, raw body.
fn serialize(code: u16, headers: &[(String, String)], body: &str) -> Vec<u8> {
    let header_block = headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{} {} HTTP/1.1\n{}\n\n{}",
        code,
        status::describe(code),
        header_block,
        body
    )
    .into_bytes()
}
