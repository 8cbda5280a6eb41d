//! # HTTP Request
//!
//! Framework-side request built once per incoming request by the server
//! adapter. Handlers only ever see it by shared reference.
//!
//! Query strings and `application/x-www-form-urlencoded` bodies are decoded
//! up front. Missing form fields are not an error: [`Request::form_value`]
//! reads them as empty strings.

use crate::error::{Error, Result};
use crate::router::Method;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Bytes;
use hyper::header::{HeaderName, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use std::collections::HashMap;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP request as seen by handlers
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Request path (without query string)
    pub path: String,
    /// Raw query string (e.g., "page=1&limit=10")
    query_string: Option<String>,
    /// Parsed query parameters
    query_params: HashMap<String, String>,
    /// Parsed form fields
    form: HashMap<String, String>,
    /// Request headers
    headers: hyper::HeaderMap,
    /// Request body (collected)
    body: Option<Bytes>,
}

impl Request {
    /// Create a request manually (tests, internal use)
    ///
    /// A `?query` suffix on `path` is split off and parsed.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let (path, query_string) = match path.split_once('?') {
            Some((p, q)) => (p.to_string(), Some(q.to_string())),
            None => (path, None),
        };
        let query_params = parse_urlencoded(query_string.as_deref().unwrap_or(""));

        Self {
            method,
            path,
            query_string,
            query_params,
            form: HashMap::new(),
            headers: hyper::HeaderMap::new(),
            body: None,
        }
    }

    /// Attach form fields, encoding them as the body
    #[must_use]
    pub fn with_form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields: Vec<(String, String)> = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let encoded = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        self.form = fields.into_iter().collect();
        self.set_header(CONTENT_TYPE.as_str(), FORM_CONTENT_TYPE);
        self.body = Some(Bytes::from(encoded));
        self
    }

    /// Attach a raw body; form fields are parsed if the request already
    /// carries a urlencoded content type
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        self.form = self.parse_form(&body);
        self.body = Some(body);
        self
    }

    /// Set a header (builder style)
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.set_header(name, value);
        self
    }

    /// Create from hyper request with body size limit
    ///
    /// # Errors
    ///
    /// - `Error::UnsupportedMethod` for methods the router doesn't know
    /// - `Error::PayloadTooLarge` if the body exceeds `max_body_size`
    /// - `Error::Http` if the body can't be read
    pub async fn from_hyper_with_limit(
        req: hyper::Request<hyper::body::Incoming>,
        max_body_size: usize,
    ) -> Result<Self> {
        let method = Method::from_hyper(req.method())
            .ok_or_else(|| Error::UnsupportedMethod(req.method().to_string()))?;

        let uri = req.uri();
        let path = uri.path().to_string();
        let query_string = uri.query().map(String::from);
        let query_params = parse_urlencoded(query_string.as_deref().unwrap_or(""));

        let headers = req.headers().clone();
        let declared_len = headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<usize>().ok());
        if let Some(content_len) = declared_len {
            if content_len > max_body_size {
                return Err(Error::PayloadTooLarge {
                    limit: max_body_size,
                    declared: Some(content_len),
                });
            }
        }

        let bytes = Limited::new(req.into_body(), max_body_size)
            .collect()
            .await
            .map_err(|e| body_error(e, max_body_size, declared_len))?
            .to_bytes();

        let mut request = Self {
            method,
            path,
            query_string,
            query_params,
            form: HashMap::new(),
            headers,
            body: None,
        };
        if !bytes.is_empty() {
            request = request.with_body(bytes);
        }
        Ok(request)
    }

    fn parse_form(&self, body: &[u8]) -> HashMap<String, String> {
        let is_form = self
            .header(CONTENT_TYPE.as_str())
            .is_some_and(|ct| ct.starts_with(FORM_CONTENT_TYPE));
        if !is_form {
            return HashMap::new();
        }
        parse_urlencoded(&String::from_utf8_lossy(body))
    }

    /// Get a form field, `None` when absent
    #[must_use]
    pub fn form(&self, name: &str) -> Option<&str> {
        self.form.get(name).map(String::as_str)
    }

    /// Get a form field, empty when absent
    #[must_use]
    pub fn form_value(&self, name: &str) -> &str {
        self.form(name).unwrap_or_default()
    }

    /// All form fields
    #[must_use]
    pub fn form_map(&self) -> &HashMap<String, String> {
        &self.form
    }

    /// Get a header value by name (case-insensitive)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Set or override a header
    pub fn set_header(&mut self, name: &str, value: &str) {
        if let (Ok(n), Ok(v)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(n, v);
        }
    }

    /// Get query parameters
    #[must_use]
    pub fn query_map(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Get raw query string
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.query_string.as_deref()
    }

    /// Get the request body as bytes
    #[must_use]
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Get the request body as string (UTF-8)
    #[must_use]
    pub fn body_str(&self) -> Option<&str> {
        self.body_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }
}

/// Map a failed body read, turning the length limit into `PayloadTooLarge`
fn body_error(
    err: Box<dyn std::error::Error + Send + Sync>,
    limit: usize,
    declared: Option<usize>,
) -> Error {
    if err.is::<LengthLimitError>() {
        return Error::PayloadTooLarge { limit, declared };
    }
    match err.downcast::<hyper::Error>() {
        Ok(e) => Error::Http(*e),
        Err(e) => Error::Io(std::io::Error::other(e)),
    }
}

/// Parse `a=1&b=2` pairs; duplicate keys keep the last value
fn parse_urlencoded(input: &str) -> HashMap<String, String> {
    input
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (url_decode(key), url_decode(value))
        })
        .collect()
}

fn url_decode(s: &str) -> String {
    let spaced = s.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned(),
    }
}
