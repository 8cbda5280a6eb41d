//! # HTTP Server
//!
//! Binds an [`App`] to a Hyper/Tokio accept loop.
//!
//! ## Key Features
//!
//! - One task per connection on the multi-threaded Tokio runtime
//! - Middleware hooks around dispatch
//! - Handler errors mapped to 500, oversized bodies to 413
//! - Graceful shutdown on Ctrl-C with a drain timeout

use crate::app::App;
use crate::error::{Error, Result};
use crate::middleware::{Middleware, MiddlewareChain, MiddlewareResult};
use crate::request::Request;
use crate::response::{plain, Response};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::StatusCode;
use hyper_util::rt::TokioIo;
use hyper_util::server::graceful::GracefulShutdown;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// HTTP Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to
    pub address: SocketAddr,
    /// Enable keep-alive connections
    pub keep_alive: bool,
    /// How long to wait for open connections on shutdown
    pub shutdown_timeout: Duration,
    /// Max request body size in bytes
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: ([0, 0, 0, 0], 8000).into(),
            keep_alive: true,
            shutdown_timeout: Duration::from_secs(30),
            max_body_size: 1024 * 1024,
        }
    }
}

/// HTTP server adapter around an immutable [`App`]
pub struct Server {
    config: ServerConfig,
    app: Arc<App>,
    middleware: MiddlewareChain,
}

impl Server {
    /// Create a server for `app` with default configuration
    #[must_use]
    pub fn new(app: App) -> Self {
        Self {
            config: ServerConfig::default(),
            app: Arc::new(app),
            middleware: MiddlewareChain::new(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Bind the server to an address
    #[must_use]
    pub const fn bind(mut self, addr: SocketAddr) -> Self {
        self.config.address = addr;
        self
    }

    /// Add a middleware to the chain
    pub fn add_middleware<M: Middleware + 'static>(&mut self, middleware: M) {
        self.middleware.add(middleware);
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve until Ctrl-C
    ///
    /// # Errors
    ///
    /// Returns `Error::BindError` if the address can't be bound.
    pub async fn serve(&self) -> Result<()> {
        let listener = self.listen()?;
        self.serve_on(listener, shutdown_signal()).await
    }

    /// Bind the configured address
    ///
    /// # Errors
    ///
    /// Returns `Error::BindError` if the address can't be bound.
    pub fn listen(&self) -> Result<TcpListener> {
        let addr = self.config.address;
        let bind_error = |source| Error::BindError {
            address: addr.to_string(),
            source,
        };

        let socket = if addr.is_ipv4() {
            tokio::net::TcpSocket::new_v4()
        } else {
            tokio::net::TcpSocket::new_v6()
        }
        .map_err(bind_error)?;
        socket.set_reuseaddr(true).map_err(bind_error)?;
        socket.bind(addr).map_err(bind_error)?;
        socket.listen(1024).map_err(bind_error)
    }

    /// Accept connections on `listener` until `shutdown` completes
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if accepting fails.
    pub async fn serve_on<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let local = listener.local_addr()?;
        info!(app = %self.app.name(), "Server listening on http://{}", local);

        let app = self.app.clone();
        let middleware = Arc::new(self.middleware.clone());
        let graceful = GracefulShutdown::new();
        let max_body_size = self.config.max_body_size;
        let keep_alive = self.config.keep_alive;

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    let (stream, remote_addr) = accept_result?;
                    let io = TokioIo::new(stream);

                    let app = app.clone();
                    let middleware = middleware.clone();
                    let service = service_fn(move |req| {
                        let app = app.clone();
                        let middleware = middleware.clone();
                        async move {
                            let method = req.method().clone();
                            let path = req.uri().path().to_string();
                            let version = req.version();

                            let response = handle_request(req, &app, &middleware, max_body_size).await;

                            info!("    {} - \"{} {} {:?}\" {}",
                                remote_addr,
                                method,
                                path,
                                version,
                                response.status()
                            );
                            Ok::<_, hyper::Error>(response)
                        }
                    });

                    let conn = http1::Builder::new()
                        .keep_alive(keep_alive)
                        .serve_connection(io, service);
                    let conn = graceful.watch(conn);
                    tokio::task::spawn(async move {
                        if let Err(err) = conn.await {
                            error!("Error serving connection: {:?}", err);
                        }
                    });
                }
                () = &mut shutdown => {
                    info!("Shutdown signal received, stopping server...");
                    break;
                }
            }
        }

        drop(listener);
        if tokio::time::timeout(self.config.shutdown_timeout, graceful.shutdown())
            .await
            .is_err()
        {
            warn!(
                timeout = ?self.config.shutdown_timeout,
                "Shutdown timeout elapsed with open connections"
            );
        }
        Ok(())
    }

    /// Run a request through middleware and dispatch without the network
    pub fn test_request(&self, req: &Request) -> Response {
        process_request(req, &self.app, &self.middleware)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Middleware, dispatch and error mapping (network agnostic)
fn process_request(req: &Request, app: &App, middleware: &MiddlewareChain) -> Response {
    let mut response = match middleware.run_before(req) {
        MiddlewareResult::Continue => app.handle(req).unwrap_or_else(|e| {
            error!(method = %req.method, path = %req.path, error = %e, "Handler failed");
            Response::internal_error()
        }),
        MiddlewareResult::Respond(resp) => resp,
    };
    middleware.run_after(req, &mut response);
    response
}

async fn handle_request(
    req: hyper::Request<hyper::body::Incoming>,
    app: &App,
    middleware: &MiddlewareChain,
    max_body_size: usize,
) -> hyper::Response<Full<Bytes>> {
    let request = match Request::from_hyper_with_limit(req, max_body_size).await {
        Ok(r) => r,
        Err(Error::PayloadTooLarge { limit, declared }) => {
            warn!(limit, declared = ?declared, "Request body too large");
            return plain(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large");
        }
        Err(Error::UnsupportedMethod(method)) => {
            warn!(%method, "Unsupported method");
            return Response::not_found().into_hyper();
        }
        Err(e) => {
            error!("Failed to parse request: {}", e);
            return plain(StatusCode::BAD_REQUEST, "Bad Request");
        }
    };

    process_request(&request, app, middleware).into_hyper()
}
