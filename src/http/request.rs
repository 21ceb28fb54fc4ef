//! Inbound request decoding.
//!
//! # Responsibilities
//! - Turn one raw socket frame into a structured `Request`
//! - Split request line, header block, and body on the blank-line boundary
//! - Normalize header names for case-insensitive lookup
//!
//! # Design Decisions
//! - Frames are UTF-8 text; the body is taken verbatim after the blank line
//! - No path normalization and no query-string splitting: the path is the
//!   raw routing key, exactly as the daemon sent it
//! - Header names are stored uppercase; values keep their original case

use std::collections::HashMap;
use std::time::Instant;

use thiserror::Error;

/// Failure to decode a raw frame into a [`Request`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The frame lacks a parsable request line or the blank-line separator.
    #[error("malformed frame: {0}")]
    MalformedFrame(&'static str),

    /// A header line could not be split into a name/value pair.
    #[error("unparsable header line: {0:?}")]
    HeaderParse(String),
}

/// One request forwarded by the daemon, immutable once decoded.
#[derive(Debug)]
pub struct Request {
    verb: String,
    path: String,
    headers: HashMap<String, String>,
    body: String,
    timestamp: Instant,
}

impl Request {
    /// Decode a complete wire frame.
    ///
    /// The frame layout mirrors the response serialization: a request line,
    /// header lines, a blank line, then the body. The request line yields
    /// verb and path by splitting on the first whitespace run.
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(raw)
            .map_err(|_| DecodeError::MalformedFrame("frame is not valid UTF-8"))?;

        let (head, body) = text
            .split_once("\n\n")
            .ok_or(DecodeError::MalformedFrame("missing blank-line separator"))?;

        let mut lines = head.split('\n');
        let request_line = lines
            .next()
            .ok_or(DecodeError::MalformedFrame("empty frame"))?;

        let split_at = request_line
            .find(char::is_whitespace)
            .ok_or(DecodeError::MalformedFrame("request line has no path"))?;
        let verb = &request_line[..split_at];
        let path = request_line[split_at..].trim_start();
        if verb.is_empty() {
            return Err(DecodeError::MalformedFrame("request line has no verb"));
        }
        if path.is_empty() {
            return Err(DecodeError::MalformedFrame("request line has no path"));
        }

        let mut headers = HashMap::new();
        for line in lines {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| DecodeError::HeaderParse(line.to_string()))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(DecodeError::HeaderParse(line.to_string()));
            }
            headers.insert(name.to_uppercase(), value.trim().to_string());
        }

        Ok(Self {
            verb: verb.to_string(),
            path: path.to_string(),
            headers,
            body: body.to_string(),
            timestamp: Instant::now(),
        })
    }

    /// The HTTP-style method token, verbatim from the request line.
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// The raw resource path, used as-is for routing.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_uppercase()).map(String::as_str)
    }

    /// All headers, keyed by their uppercased canonical names.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Everything after the blank-line separator, verbatim.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Monotonic instant the frame was decoded. Diagnostics only; routing
    /// never looks at it.
    pub fn received_at(&self) -> Instant {
        self.timestamp
    }
}
