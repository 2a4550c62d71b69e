//! Transport port
//!
//! The transport executes one prepared request and reports what happened as
//! a [`RawOutcome`]. It never retries and never interprets the status code.

use async_trait::async_trait;
use ksapi_domain::{Headers, PreparedRequest};
use thiserror::Error;

/// Transport-level failures, before any HTTP status is interpreted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request timed out.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed, in milliseconds
        timeout_ms: u64,
    },

    /// DNS resolution failed.
    #[error("could not resolve host {host}: {message}")]
    DnsError {
        /// Host that failed to resolve
        host: String,
        /// Underlying resolver message
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host
        host: String,
        /// Target port
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit
        max: usize,
    },

    /// The request could not be turned into a wire request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response body could not be read to the end.
    #[error("failed to read response body: {0}")]
    BodyRead(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Everything a single network attempt produced.
///
/// A transport error may coexist with a status and headers when the
/// failure happened after the response head arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutcome {
    /// HTTP status code, when a response head arrived
    pub status: Option<u16>,
    /// Response headers
    pub headers: Headers,
    /// Response body bytes, when any were read
    pub body: Option<Vec<u8>>,
    /// Transport-level error, when the attempt failed
    pub error: Option<TransportError>,
}

impl RawOutcome {
    /// A completed response.
    #[must_use]
    pub fn response(status: u16, headers: Headers, body: Option<Vec<u8>>) -> Self {
        Self {
            status: Some(status),
            headers,
            body,
            error: None,
        }
    }

    /// A failed attempt with no response.
    #[must_use]
    pub fn failed(error: TransportError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Attaches a transport error to a partial response.
    #[must_use]
    pub fn with_error(mut self, error: TransportError) -> Self {
        self.error = Some(error);
        self
    }

    /// Returns the `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }
}

/// Port for executing prepared requests.
///
/// Implementations share one connection pool across calls. Dropping the
/// returned future must abort the network operation and release its
/// connection.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes the request once and reports the outcome.
    async fn execute(&self, request: PreparedRequest) -> RawOutcome;
}
