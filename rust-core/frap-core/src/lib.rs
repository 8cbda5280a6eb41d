//! # Frap Core
//!
//! Core library for the Frap web framework: routing, reverse URL lookup,
//! HTTP serving, HTML components, templates and a small SQLite layer.
//!
//! ## Architecture
//!
//! Routes and URL rules are collected by an [`AppBuilder`] and frozen into
//! an immutable [`App`]. The [`Server`] shares that app across one Tokio
//! task per connection; mutable state such as the [`MessageBoard`] is
//! injected into handlers by closure capture.
//!
//! ## Modules
//!
//! - `app` - Builder and dispatcher
//! - `router` - HTTP methods and the ordered route table
//! - `route` - Route (path, methods, handler)
//! - `url` - Endpoint URL rules and reverse lookup
//! - `types` - Typed URL placeholder values
//! - `request` / `response` - HTTP request and response values
//! - `server` - HTTP server built on Hyper
//! - `middleware` - Request/response hooks
//! - `components` - HTML widget renderers
//! - `templates` - MiniJinja page templates
//! - `database` - SQLx SQLite access
//! - `state` - Shared message board
//! - `error` - Error types and handling

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod app;
pub mod components;
pub mod database;
pub mod error;
pub mod middleware;
pub mod request;
pub mod response;
pub mod route;
pub mod router;
pub mod server;
pub mod state;
pub mod templates;
pub mod types;
pub mod url;

pub use app::{App, AppBuilder, Handler};
pub use components::Component;
pub use database::{DbRow, DbValue, Orm};
pub use error::{Error, Result};
pub use middleware::{LoggingMiddleware, Middleware, MiddlewareChain, MiddlewareResult};
pub use request::Request;
pub use response::Response;
pub use route::Route;
pub use router::{Method, RouteTable};
pub use server::{Server, ServerConfig};
pub use state::MessageBoard;
pub use templates::{markup, Templates};
pub use types::{ParamType, ParamValue, UrlValues};
pub use url::{UrlRegistry, UrlRule};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
