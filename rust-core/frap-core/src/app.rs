//! # Application / Dispatcher
//!
//! [`AppBuilder`] collects URL rules and routes; [`AppBuilder::build`]
//! freezes them into an immutable [`App`] that can be shared across
//! connection tasks.
//!
//! ```ignore
//! let app = App::builder("demo")
//!     .url_rule("login", "/login")?
//!     .route("/login", &[Method::Get, Method::Post], |req, app| {
//!         Ok(Response::redirect(&app.url_for("login")?))
//!     })
//!     .build();
//! ```

use crate::error::Result;
use crate::request::Request;
use crate::response::Response;
use crate::route::Route;
use crate::router::{Method, RouteTable};
use crate::types::UrlValues;
use crate::url::UrlRegistry;
use std::sync::Arc;
use tracing::debug;

/// Request handler
///
/// Receives the request and the app (for reverse URL lookups). Errors are
/// not caught by the dispatcher.
pub type Handler = Arc<dyn Fn(&Request, &App) -> Result<Response> + Send + Sync>;

/// Collects URL rules and routes before the app is frozen
#[derive(Debug, Default)]
pub struct AppBuilder {
    name: String,
    routes: RouteTable,
    urls: UrlRegistry,
}

impl AppBuilder {
    /// Register a handler for `path` under `methods` (empty means GET)
    #[must_use]
    pub fn route<F>(mut self, path: &str, methods: &[Method], handler: F) -> Self
    where
        F: Fn(&Request, &App) -> Result<Response> + Send + Sync + 'static,
    {
        self.routes.push(Route::new(path, methods, Arc::new(handler)));
        self
    }

    /// Register an already shared handler
    #[must_use]
    pub fn route_handler(mut self, path: &str, methods: &[Method], handler: Handler) -> Self {
        self.routes.push(Route::new(path, methods, handler));
        self
    }

    /// Register a URL rule for reverse lookups
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrlRule` if the pattern is malformed.
    pub fn url_rule(mut self, endpoint: &str, pattern: &str) -> Result<Self> {
        self.urls.register(endpoint, pattern)?;
        Ok(self)
    }

    /// Freeze into an immutable app
    #[must_use]
    pub fn build(self) -> App {
        debug!(
            app = %self.name,
            routes = self.routes.len(),
            endpoints = self.urls.len(),
            "App built"
        );
        App {
            name: self.name,
            routes: self.routes,
            urls: self.urls,
        }
    }
}

/// Immutable request dispatcher plus URL registry
#[derive(Debug, Clone)]
pub struct App {
    name: String,
    routes: RouteTable,
    urls: UrlRegistry,
}

impl App {
    /// Start building an app
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AppBuilder {
        AppBuilder {
            name: name.into(),
            ..AppBuilder::default()
        }
    }

    /// App name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered routes in order
    #[must_use]
    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// URL registry
    #[must_use]
    pub const fn urls(&self) -> &UrlRegistry {
        &self.urls
    }

    /// Invoke the first route matching `path` and `method`
    ///
    /// Returns 404 "Not Found" when nothing matches.
    ///
    /// # Errors
    ///
    /// Propagates the handler's error unchanged.
    pub fn dispatch(&self, path: &str, method: Method, request: &Request) -> Result<Response> {
        match self.routes.find(path, method) {
            Some(route) => (route.handler)(request, self),
            None => {
                debug!(%method, %path, "No route matched");
                Ok(Response::not_found())
            }
        }
    }

    /// Dispatch using the request's own path and method
    ///
    /// # Errors
    ///
    /// Propagates the handler's error unchanged.
    pub fn handle(&self, request: &Request) -> Result<Response> {
        self.dispatch(&request.path, request.method, request)
    }

    /// URL for an endpoint without placeholders
    ///
    /// # Errors
    ///
    /// `Error::EndpointNotFound` for unknown endpoints,
    /// `Error::MissingUrlValue` if the pattern has placeholders.
    pub fn url_for(&self, endpoint: &str) -> Result<String> {
        self.urls.resolve(endpoint, &UrlValues::new())
    }

    /// URL for an endpoint with placeholder values
    ///
    /// # Errors
    ///
    /// See [`UrlRegistry::resolve`].
    pub fn url_for_with(&self, endpoint: &str, values: &UrlValues) -> Result<String> {
        self.urls.resolve(endpoint, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(counter: &Arc<AtomicUsize>, body: &'static str) -> Handler {
        let counter = counter.clone();
        Arc::new(move |_req: &Request, _app: &App| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Response::text(body))
        })
    }

    #[test]
    fn test_dispatch_invokes_handler_once_per_method() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = App::builder("test")
            .route_handler("/message", &[Method::Get, Method::Post], counting(&hits, "ok"))
            .build();

        for method in [Method::Get, Method::Post] {
            let req = Request::new(method, "/message");
            let resp = app.handle(&req).unwrap();
            assert_eq!(resp.status, 200);
        }
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dispatch_not_found() {
        let app = App::builder("test")
            .route("/", &[], |_req, _app| Ok(Response::text("home")))
            .build();

        for (path, method) in [("/missing", Method::Get), ("/", Method::Post), ("//", Method::Get)] {
            let resp = app.dispatch(path, method, &Request::new(method, path)).unwrap();
            assert_eq!(resp.status, 404);
            assert_eq!(resp.body, "Not Found");
        }
    }

    #[test]
    fn test_dispatch_first_match_wins() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let app = App::builder("test")
            .route_handler("/dup", &[Method::Get], counting(&first, "first"))
            .route_handler("/dup", &[Method::Get], counting(&second, "second"))
            .build();

        let resp = app.handle(&Request::new(Method::Get, "/dup")).unwrap();
        assert_eq!(resp.body, "first");
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dispatch_skips_routes_without_method() {
        let app = App::builder("test")
            .route("/dup", &[Method::Post], |_req, _app| Ok(Response::text("post")))
            .route("/dup", &[Method::Get], |_req, _app| Ok(Response::text("get")))
            .build();

        let resp = app.handle(&Request::new(Method::Get, "/dup")).unwrap();
        assert_eq!(resp.body, "get");
    }

    #[test]
    fn test_dispatch_propagates_handler_error() {
        let app = App::builder("test")
            .route("/boom", &[], |_req, _app| Err(Error::handler("boom")))
            .build();

        let err = app.handle(&Request::new(Method::Get, "/boom")).unwrap_err();
        assert!(matches!(err, Error::Handler { .. }));
    }

    #[test]
    fn test_handler_can_use_url_for() {
        let app = App::builder("test")
            .url_rule("message", "/message")
            .unwrap()
            .route("/go", &[Method::Post], |_req, app| {
                Ok(Response::redirect(&app.url_for("message")?))
            })
            .build();

        let resp = app.handle(&Request::new(Method::Post, "/go")).unwrap();
        assert_eq!(resp.status, 303);
        assert_eq!(resp.header("Location"), Some("/message"));
    }

    #[test]
    fn test_url_for() {
        let app = App::builder("test")
            .url_rule("login", "/login")
            .unwrap()
            .url_rule("user", "/users/{id:int}")
            .unwrap()
            .build();

        assert_eq!(app.url_for("login").unwrap(), "/login");
        assert_eq!(
            app.url_for_with("user", &UrlValues::new().with("id", 5)).unwrap(),
            "/users/5"
        );
        assert!(matches!(
            app.url_for("nope"),
            Err(Error::EndpointNotFound { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_bad_rule() {
        let result = App::builder("test").url_rule("bad", "/{oops");
        assert!(matches!(result, Err(Error::InvalidUrlRule { .. })));
    }
}
