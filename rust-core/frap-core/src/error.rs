//! # Error Handling
//!
//! Centralized error types for Frap core.
//! Uses `thiserror` for ergonomic error definitions.

use thiserror::Error;

/// Result type alias for Frap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the Frap runtime
#[derive(Error, Debug)]
pub enum Error {
    /// Server failed to bind to the specified address
    #[error("Failed to bind server to {address}: {source}")]
    BindError {
        /// The address we tried to bind to
        address: String,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Reverse lookup for an endpoint that was never registered
    #[error("Endpoint '{endpoint}' not found in URL rules")]
    EndpointNotFound {
        /// The unknown endpoint name
        endpoint: String,
    },

    /// Malformed URL pattern given at registration time
    #[error("Invalid URL rule {pattern}: {reason}")]
    InvalidUrlRule {
        /// The invalid pattern
        pattern: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A placeholder of the pattern received no value
    #[error("Missing value for placeholder '{name}' of endpoint '{endpoint}'")]
    MissingUrlValue {
        /// Endpoint being resolved
        endpoint: String,
        /// Placeholder without a value
        name: String,
    },

    /// A value was supplied for a name the pattern doesn't contain
    #[error("Unexpected value '{name}' for endpoint '{endpoint}'")]
    UnexpectedUrlValue {
        /// Endpoint being resolved
        endpoint: String,
        /// Name not present in the pattern
        name: String,
    },

    /// A typed placeholder received a value of another type
    #[error("Placeholder '{name}' expects {expected}, got {actual}")]
    UrlValueType {
        /// Placeholder name
        name: String,
        /// Declared placeholder type
        expected: &'static str,
        /// Type of the supplied value
        actual: &'static str,
    },

    /// Request method not understood by the framework
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Handler-level failure, surfaced to the server adapter as a 500
    #[error("Handler error: {message}")]
    Handler {
        /// Description of the failure
        message: String,
    },

    /// Template lookup or rendering failed
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Component configuration could not be decoded
    #[error("Component config error: {0}")]
    ComponentConfig(#[source] serde_json::Error),

    /// HTTP protocol error
    #[error("HTTP error: {0}")]
    Http(#[from] hyper::Error),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {message}")]
    Database {
        /// Error message from database
        message: String,
    },

    /// Request payload too large
    #[error("Payload too large: limit={limit} bytes, declared={declared:?}")]
    PayloadTooLarge {
        /// Max allowed size
        limit: usize,
        /// `Content-Length`, when the client sent one
        declared: Option<usize>,
    },
}

impl Error {
    /// Build a handler error from any displayable cause
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler {
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Self::Database {
            message: e.to_string(),
        }
    }
}
