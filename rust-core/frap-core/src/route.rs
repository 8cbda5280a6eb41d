//! # Route Definition
//!
//! A route binds an exact path and a set of methods to a handler.

use crate::app::Handler;
use crate::router::Method;
use std::fmt;

/// A (path, methods, handler) binding
///
/// Routes are created by [`crate::app::AppBuilder`] and never change after
/// the app is built.
#[derive(Clone)]
pub struct Route {
    /// Exact request path (e.g. "/login")
    pub path: String,
    /// Methods this route answers
    pub methods: Vec<Method>,
    pub(crate) handler: Handler,
}

impl Route {
    /// Create a route; an empty method list means `GET` only
    pub fn new(path: impl Into<String>, methods: &[Method], handler: Handler) -> Self {
        let mut unique = Vec::with_capacity(methods.len().max(1));
        for method in methods {
            if !unique.contains(method) {
                unique.push(*method);
            }
        }
        if unique.is_empty() {
            unique.push(Method::Get);
        }

        Self {
            path: path.into(),
            methods: unique,
            handler,
        }
    }

    /// Exact path equality and method membership
    #[must_use]
    pub fn matches(&self, path: &str, method: Method) -> bool {
        self.path == path && self.methods.contains(&method)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::request::Request;
    use crate::response::Response;
    use std::sync::Arc;

    fn noop() -> Handler {
        Arc::new(|_req: &Request, _app: &App| Ok(Response::text("ok")))
    }

    #[test]
    fn test_route_defaults_to_get() {
        let route = Route::new("/", &[], noop());
        assert_eq!(route.methods, vec![Method::Get]);
    }

    #[test]
    fn test_route_dedups_methods() {
        let route = Route::new("/login", &[Method::Post, Method::Get, Method::Post], noop());
        assert_eq!(route.methods, vec![Method::Post, Method::Get]);
    }

    #[test]
    fn test_route_matches_exactly() {
        let route = Route::new("/message", &[Method::Get, Method::Post], noop());
        assert!(route.matches("/message", Method::Get));
        assert!(route.matches("/message", Method::Post));
        assert!(!route.matches("/message", Method::Delete));
        assert!(!route.matches("/message/", Method::Get));
        assert!(!route.matches("/Message", Method::Get));
        assert!(!route.matches("/messages", Method::Get));
    }
}
