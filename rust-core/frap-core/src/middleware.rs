//! # Middleware
//!
//! Hooks the server adapter runs around dispatch. The dispatcher itself
//! never calls them, so [`crate::App::handle`] stays a pure route lookup.

use crate::request::Request;
use crate::response::Response;
use std::sync::Arc;
use tracing::info;

/// Request/response interception
///
/// `process_request` runs in registration order before dispatch;
/// `process_response` runs in reverse order afterwards.
pub trait Middleware: Send + Sync {
    /// Inspect the request, optionally answering it directly
    fn process_request(&self, _req: &Request) -> MiddlewareResult {
        MiddlewareResult::Continue
    }

    /// Inspect or modify the outgoing response
    fn process_response(&self, _req: &Request, _res: &mut Response) {}

    /// Middleware name for logging
    fn name(&self) -> &'static str {
        "Unknown"
    }
}

/// Result of `process_request`
#[derive(Debug)]
pub enum MiddlewareResult {
    /// Continue to the next middleware and then dispatch
    Continue,
    /// Skip dispatch and answer with this response
    Respond(Response),
}

/// Ordered middleware list
#[derive(Default, Clone)]
pub struct MiddlewareChain {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    /// Create a new empty middleware chain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a middleware to the chain
    pub fn add<M: Middleware + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Arc::new(middleware));
    }

    /// Run `process_request` until one middleware responds
    pub fn run_before(&self, req: &Request) -> MiddlewareResult {
        for mw in &self.middlewares {
            if let MiddlewareResult::Respond(resp) = mw.process_request(req) {
                return MiddlewareResult::Respond(resp);
            }
        }
        MiddlewareResult::Continue
    }

    /// Run `process_response` in reverse order
    pub fn run_after(&self, req: &Request, res: &mut Response) {
        for mw in self.middlewares.iter().rev() {
            mw.process_response(req, res);
        }
    }

    /// Names in registration order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.middlewares.iter().map(|mw| mw.name()).collect()
    }

    /// Get the number of middlewares
    #[must_use]
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Check if chain is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }
}

impl std::fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareChain")
            .field("middlewares", &self.names())
            .finish()
    }
}

/// Logs every request and response
#[derive(Debug, Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    /// Create a new logging middleware
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Middleware for LoggingMiddleware {
    fn process_request(&self, req: &Request) -> MiddlewareResult {
        info!(
            method = %req.method,
            path = %req.path,
            form_fields = req.form_map().len(),
            "Request received"
        );
        MiddlewareResult::Continue
    }

    fn process_response(&self, req: &Request, res: &mut Response) {
        info!(
            method = %req.method,
            path = %req.path,
            status = res.status,
            bytes = res.body.len(),
            "Response sent"
        );
    }

    fn name(&self) -> &'static str {
        "LoggingMiddleware"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Method;
    use std::sync::Mutex;

    struct Recorder {
        tag: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Middleware for Recorder {
        fn process_request(&self, _req: &Request) -> MiddlewareResult {
            self.log.lock().unwrap().push(format!("before:{}", self.tag));
            MiddlewareResult::Continue
        }

        fn process_response(&self, _req: &Request, res: &mut Response) {
            self.log.lock().unwrap().push(format!("after:{}", self.tag));
            res.set_header("x-seen", self.tag);
        }

        fn name(&self) -> &'static str {
            self.tag
        }
    }

    struct Blocker;

    impl Middleware for Blocker {
        fn process_request(&self, _req: &Request) -> MiddlewareResult {
            MiddlewareResult::Respond(Response::text("blocked").with_status(403))
        }
    }

    #[test]
    fn test_middleware_chain_empty() {
        let chain = MiddlewareChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_chain_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chain = MiddlewareChain::new();
        chain.add(Recorder { tag: "a", log: log.clone() });
        chain.add(Recorder { tag: "b", log: log.clone() });

        let req = Request::new(Method::Get, "/");
        assert!(matches!(chain.run_before(&req), MiddlewareResult::Continue));
        let mut res = Response::text("ok");
        chain.run_after(&req, &mut res);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["before:a", "before:b", "after:b", "after:a"]
        );
        assert_eq!(res.header("x-seen"), Some("a"));
        assert_eq!(chain.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_chain_short_circuits() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chain = MiddlewareChain::new();
        chain.add(Blocker);
        chain.add(Recorder { tag: "late", log: log.clone() });

        let req = Request::new(Method::Get, "/");
        match chain.run_before(&req) {
            MiddlewareResult::Respond(resp) => assert_eq!(resp.status, 403),
            MiddlewareResult::Continue => panic!("expected short-circuit"),
        }
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_logging_middleware_name() {
        let mw = LoggingMiddleware::new();
        assert_eq!(mw.name(), "LoggingMiddleware");
        assert_eq!(mw.name(), LoggingMiddleware.name());
    }
}
