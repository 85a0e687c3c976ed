//! The request and response values passed through the router.
use std::collections::HashMap;

use hyper::{Method, StatusCode};

const NOT_FOUND_BODY: &str = r#"{"error": "Resource not found"}"#;
const METHOD_NOT_ALLOWED_BODY: &str = r#"{"error": "Method not allowed for this resource"}"#;

/// An incoming request.
///
/// `path_params` is filled in by the router for the copy of the request that is
/// handed to the matched handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub path_params: HashMap<String, String>,
}

impl Request {
    /// Creates a request with no headers, an empty body and no path parameters.
    /// ```rust
    /// use pathrouter::Request;
    /// use hyper::Method;
    ///
    /// let req = Request::new(Method::POST, "/users")
    ///     .with_header("Content-Type", "application/json")
    ///     .with_body(r#"{"name": "gordon"}"#);
    ///
    /// assert_eq!(req.header("Content-Type"), Some("application/json"));
    /// assert!(req.path_params.is_empty());
    /// ```
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HashMap::new(),
            body: String::new(),
            path_params: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Looks up a header by its exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Looks up a path parameter bound by the router.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }
}

/// An outgoing response.
///
/// `status_text` is kept apart from `status` so that the exact reason phrase chosen by
/// a handler survives. The default response is `200 OK` with no headers and an empty
/// body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub status_text: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Default for Response {
    fn default() -> Self {
        Self::with_status(StatusCode::OK)
    }
}

impl Response {
    /// A `200 OK` response carrying `body`.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// An empty response with `status` and its canonical reason phrase.
    /// ```rust
    /// use pathrouter::Response;
    /// use hyper::StatusCode;
    ///
    /// let res = Response::with_status(StatusCode::CREATED);
    /// assert_eq!(res.status_text, "Created");
    /// assert!(res.body.is_empty());
    /// ```
    pub fn with_status(status: StatusCode) -> Self {
        Self {
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_owned(),
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self.status_text = status.canonical_reason().unwrap_or_default().to_owned();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub(crate) fn not_found() -> Self {
        Self::json_error(StatusCode::NOT_FOUND, NOT_FOUND_BODY)
    }

    pub(crate) fn method_not_allowed() -> Self {
        Self::json_error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_BODY)
    }

    fn json_error(status: StatusCode, body: &str) -> Self {
        Self::with_status(status)
            .with_header("Content-Type", "application/json")
            .with_body(body)
    }
}
