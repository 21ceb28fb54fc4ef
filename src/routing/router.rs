//! Endpoint table lookup and dispatch.
//!
//! # Responsibilities
//! - Store registered endpoint handlers
//! - Select the handler for a request by exact key match
//! - Abort the response when nothing matches, so a reply always goes out
//!
//! # Design Decisions
//! - Plain `HashMap` keyed by [`EndpointKey`]; O(1) lookup, no priority
//!   ordering because duplicate keys overwrite
//! - Dispatch reports handler failures as [`Dispatch::Failed`] rather than
//!   propagating them; the session decides how to answer the daemon

use std::collections::HashMap;

use crate::http::{Request, Response};
use crate::routing::endpoint::{EndpointKey, Handler, HandlerError, HandlerResult};

/// Outcome of dispatching one request.
#[derive(Debug)]
pub enum Dispatch {
    /// A handler was invoked and returned cleanly.
    Handled,
    /// No endpoint matched; the response was aborted.
    NoRoute,
    /// A handler was invoked and returned an error.
    Failed(HandlerError),
}

/// Session-local endpoint table.
pub struct Router {
    endpoints: HashMap<EndpointKey, Handler>,
}

impl Router {
    /// Empty table.
    pub fn new() -> Self {
        Self {
            endpoints: HashMap::new(),
        }
    }

    /// Register a handler for a verb/path pair. Re-registering the same
    /// pair replaces the previous handler.
    pub fn bind<F>(&mut self, verb: &str, path: &str, handler: F)
    where
        F: Fn(&Request, &mut Response) -> HandlerResult + Send + Sync + 'static,
    {
        let key = EndpointKey::new(verb, path);
        if self.endpoints.insert(key.clone(), Box::new(handler)).is_some() {
            tracing::debug!(endpoint = %key, "Endpoint re-bound, previous handler replaced");
        }
    }

    /// Invoke the handler matching the request, or abort the response.
    ///
    /// The handler runs at most once. Never panics past this call; handler
    /// errors come back as [`Dispatch::Failed`].
    pub fn dispatch(&self, request: &Request, response: &mut Response) -> Dispatch {
        let key = EndpointKey::new(request.verb(), request.path());
        match self.endpoints.get(&key) {
            Some(handler) => match handler(request, response) {
                Ok(()) => Dispatch::Handled,
                Err(err) => Dispatch::Failed(err),
            },
            None => {
                response.abort();
                Dispatch::NoRoute
            }
        }
    }

    /// Number of registered endpoints.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn request(verb: &str, path: &str) -> Request {
        Request::decode(format!("{} {}\n\n", verb, path).as_bytes()).unwrap()
    }

    #[test]
    fn matching_request_invokes_handler_exactly_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let mut router = Router::new();
        router.bind("GET", "/a", move |_req, res| {
            counter.fetch_add(1, Ordering::SeqCst);
            res.send("hit")?;
            Ok(())
        });

        let mut res = Response::new();
        let outcome = router.dispatch(&request("GET", "/a"), &mut res);

        assert!(matches!(outcome, Dispatch::Handled));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(res.is_finalized());
    }

    #[test]
    fn unmatched_request_aborts_and_invokes_nothing() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let mut router = Router::new();
        router.bind("GET", "/a", move |_req, res| {
            counter.fetch_add(1, Ordering::SeqCst);
            res.send("")?;
            Ok(())
        });

        let mut res = Response::new();
        let outcome = router.dispatch(&request("GET", "/b"), &mut res);

        assert!(matches!(outcome, Dispatch::NoRoute));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(res.is_finalized());
        assert_eq!(res.take_frame().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn verb_must_match_as_well_as_path() {
        let mut router = Router::new();
        router.bind("POST", "/a", |_req, res| {
            res.send("")?;
            Ok(())
        });

        let mut res = Response::new();
        assert!(matches!(
            router.dispatch(&request("GET", "/a"), &mut res),
            Dispatch::NoRoute
        ));
    }

    #[test]
    fn rebinding_replaces_the_previous_handler() {
        let mut router = Router::new();
        router.bind("GET", "/x", |_req, res| {
            res.send("A")?;
            Ok(())
        });
        router.bind("GET", "/x", |_req, res| {
            res.send("B")?;
            Ok(())
        });
        assert_eq!(router.len(), 1);

        let mut res = Response::new();
        router.dispatch(&request("GET", "/x"), &mut res);
        let frame = String::from_utf8(res.take_frame().unwrap()).unwrap();
        assert!(frame.ends_with("\n\nB"));
    }

    #[test]
    fn handler_error_is_reported_not_propagated() {
        let mut router = Router::new();
        router.bind("GET", "/boom", |_req, _res| Err("handler exploded".into()));

        let mut res = Response::new();
        let outcome = router.dispatch(&request("GET", "/boom"), &mut res);

        match outcome {
            Dispatch::Failed(err) => assert_eq!(err.to_string(), "handler exploded"),
            other => panic!("expected Failed, got {:?}", other),
        }
        // The session decides what to reply; nothing is sealed yet.
        assert!(!res.is_finalized());
    }
}
