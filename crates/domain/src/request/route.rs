//! Route descriptor type

use serde_json::Value;

use super::{FileUpload, HttpMethod, QueryParams};

/// Structured description of one logical API operation.
///
/// A descriptor fully determines the request it produces; it is built per
/// call and consumed once by the request builder.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescriptor {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the API base URL (e.g. "/v1/users/self").
    pub path: String,
    /// Ordered parameters.
    pub query: QueryParams,
    /// Optional file sent as a multipart upload.
    pub file: Option<FileUpload>,
}

impl RouteDescriptor {
    /// Creates a route with no parameters.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            file: None,
        }
    }

    /// Creates a GET route.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST route.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PUT route.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Creates a DELETE route.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Adds a parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Adds a parameter when a value is present.
    #[must_use]
    pub fn param_opt<V: Into<Value>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.query = self.query.with_opt(key, value);
        self
    }

    /// Replaces the parameters.
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Attaches a file upload.
    #[must_use]
    pub fn with_file(mut self, file: FileUpload) -> Self {
        self.file = Some(file);
        self
    }

    /// Returns true when parameters belong in the query string.
    ///
    /// GET requests and multipart uploads carry their parameters in the
    /// URL; every other request sends them as a JSON body.
    #[must_use]
    pub const fn params_in_url(&self) -> bool {
        !self.method.has_body() || self.file.is_some()
    }
}
