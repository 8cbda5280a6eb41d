//! # HTTP Response
//!
//! Response value produced by handlers and written once by the server
//! adapter.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::StatusCode;
use std::collections::HashMap;

/// HTTP response produced by a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
    /// Content type
    pub content_type: String,
    /// Response headers (Content-Type excluded)
    pub headers: HashMap<String, String>,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: 200,
            body: String::new(),
            content_type: "text/html; charset=utf-8".to_string(),
            headers: HashMap::new(),
        }
    }
}

impl Response {
    /// Create an HTML response
    #[must_use]
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// Create a plain-text response
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            content_type: "text/plain; charset=utf-8".to_string(),
            ..Self::default()
        }
    }

    /// 303 See Other to `location`, empty body
    #[must_use]
    pub fn redirect(location: &str) -> Self {
        Self::text("")
            .with_status(303)
            .with_header("Location", location)
    }

    /// 404 with body "Not Found"
    #[must_use]
    pub fn not_found() -> Self {
        Self::text("Not Found").with_status(404)
    }

    /// 500 with body "Internal Server Error"
    #[must_use]
    pub fn internal_error() -> Self {
        Self::text("Internal Server Error").with_status(500)
    }

    /// Set status code
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Set header
    #[must_use]
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.set_header(key, value);
        self
    }

    /// Set or override a header
    pub fn set_header(&mut self, key: &str, value: &str) {
        if key.eq_ignore_ascii_case("content-type") {
            self.content_type = value.to_string();
        } else {
            self.headers.insert(key.to_string(), value.to_string());
        }
    }

    /// Get a header value; the name is matched case-insensitively
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        if key.eq_ignore_ascii_case("content-type") {
            return Some(&self.content_type);
        }
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Convert to hyper Response
    pub(crate) fn into_hyper(self) -> hyper::Response<Full<Bytes>> {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut builder = hyper::Response::builder()
            .status(status)
            .header("Content-Type", &self.content_type);
        for (k, v) in &self.headers {
            builder = builder.header(k.as_str(), v.as_str());
        }

        builder
            .body(Full::new(Bytes::from(self.body)))
            .unwrap_or_else(|_| plain(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"))
    }
}

/// Minimal hyper response for adapter-level failures
pub(crate) fn plain(status: StatusCode, body: &'static str) -> hyper::Response<Full<Bytes>> {
    let mut response = hyper::Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect() {
        let resp = Response::redirect("/message");
        assert_eq!(resp.status, 303);
        assert!(resp.body.is_empty());
        assert_eq!(resp.header("location"), Some("/message"));
    }

    #[test]
    fn test_not_found() {
        let resp = Response::not_found();
        assert_eq!(resp.status, 404);
        assert_eq!(resp.body, "Not Found");
    }

    #[test]
    fn test_content_type_header_is_tracked_separately() {
        let resp = Response::html("<p>hi</p>").with_header("Content-Type", "text/plain");
        assert_eq!(resp.content_type, "text/plain");
        assert!(resp.headers.is_empty());
    }

    #[test]
    fn test_into_hyper() {
        let resp = Response::redirect("/login").into_hyper();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()["location"], "/login");
    }

    #[test]
    fn test_invalid_status_becomes_500() {
        let resp = Response::text("x").with_status(1000).into_hyper();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
