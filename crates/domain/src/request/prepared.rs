//! Transport-ready request type

use url::Url;
use uuid::Uuid;

use super::{Headers, HttpMethod, RequestBody};
use crate::id::generate_request_id;

/// A fully-formed request: method, absolute URL, headers and body.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// Identifier used to correlate log lines.
    pub id: Uuid,
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: Url,
    /// HTTP headers
    pub headers: Headers,
    /// Request body
    pub body: RequestBody,
}

impl PreparedRequest {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            id: generate_request_id(),
            method,
            url,
            headers: Headers::new(),
            body: RequestBody::None,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}
