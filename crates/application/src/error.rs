//! Pipeline error types
//!
//! The REST and GraphQL paths report failures through two disjoint
//! taxonomies, [`ApiError`] and [`GraphError`].

use ksapi_domain::Headers;
use ksapi_domain::models::ErrorEnvelope;
use thiserror::Error;

use crate::ports::TransportError;

/// REST pipeline failures.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The page cursor is not an absolute http(s) URL.
    #[error("invalid pagination target {target:?}: {reason}")]
    InvalidPaginationTarget {
        /// The cursor as supplied
        target: String,
        /// Why it was rejected
        reason: String,
    },

    /// The route path could not be joined with the API base URL.
    #[error("invalid route {path:?}: {reason}")]
    InvalidRoute {
        /// The route path
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// The transport failed.
    #[error("network error: {source}")]
    Network {
        /// Underlying transport error
        source: TransportError,
        /// Status of the partial response, if one arrived
        status: Option<u16>,
        /// Headers of the partial response
        headers: Headers,
        /// Body bytes read before the failure
        body: Option<Vec<u8>>,
    },

    /// The server answered with a status outside `200..300`.
    #[error("request failed with status {status}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Response headers
        headers: Headers,
        /// Raw response body, undecoded
        body: Option<Vec<u8>>,
    },

    /// The response is not JSON.
    #[error("unexpected content type {}", content_type.as_deref().unwrap_or("(none)"))]
    UnexpectedContentType {
        /// HTTP status code
        status: u16,
        /// The `Content-Type` header, if any
        content_type: Option<String>,
    },

    /// A JSON response arrived without a body.
    #[error("empty response body")]
    EmptyResponseBody {
        /// HTTP status code
        status: u16,
    },

    /// The body could not be parsed or did not fit the target type.
    #[error("could not decode JSON: {0}")]
    CouldNotDecodeJson(String),
}

/// Stable, copyable classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// See [`ApiError::InvalidPaginationTarget`].
    InvalidPaginationTarget,
    /// See [`ApiError::InvalidRoute`].
    InvalidRoute,
    /// See [`ApiError::Network`].
    Network,
    /// See [`ApiError::RequestFailed`].
    RequestFailed,
    /// See [`ApiError::UnexpectedContentType`].
    UnexpectedContentType,
    /// See [`ApiError::EmptyResponseBody`].
    EmptyResponseBody,
    /// See [`ApiError::CouldNotDecodeJson`].
    CouldNotDecodeJson,
}

impl ApiErrorKind {
    /// Returns a short, stable name for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPaginationTarget => "invalid_pagination_target",
            Self::InvalidRoute => "invalid_route",
            Self::Network => "network",
            Self::RequestFailed => "request_failed",
            Self::UnexpectedContentType => "unexpected_content_type",
            Self::EmptyResponseBody => "empty_response_body",
            Self::CouldNotDecodeJson => "could_not_decode_json",
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ApiError {
    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        match self {
            Self::InvalidPaginationTarget { .. } => ApiErrorKind::InvalidPaginationTarget,
            Self::InvalidRoute { .. } => ApiErrorKind::InvalidRoute,
            Self::Network { .. } => ApiErrorKind::Network,
            Self::RequestFailed { .. } => ApiErrorKind::RequestFailed,
            Self::UnexpectedContentType { .. } => ApiErrorKind::UnexpectedContentType,
            Self::EmptyResponseBody { .. } => ApiErrorKind::EmptyResponseBody,
            Self::CouldNotDecodeJson(_) => ApiErrorKind::CouldNotDecodeJson,
        }
    }

    /// Returns the HTTP status code, when a response arrived.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            Self::RequestFailed { status, .. }
            | Self::UnexpectedContentType { status, .. }
            | Self::EmptyResponseBody { status } => Some(*status),
            _ => None,
        }
    }

    /// Parses the server's error envelope out of a non-2xx body.
    ///
    /// Returns `None` for other kinds or when the body is not an envelope.
    #[must_use]
    pub fn error_envelope(&self) -> Option<ErrorEnvelope> {
        match self {
            Self::RequestFailed {
                body: Some(body), ..
            } => serde_json::from_slice(body).ok(),
            _ => None,
        }
    }

    /// Returns true for failures that can only occur after a 2xx status,
    /// i.e. the server accepted the call but its body was unreadable.
    #[must_use]
    pub const fn is_unreadable_success(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedContentType { .. }
                | Self::EmptyResponseBody { .. }
                | Self::CouldNotDecodeJson(_)
        )
    }
}

/// Result type alias for REST operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// GraphQL pipeline failures.
#[derive(Debug, Clone, Error)]
pub enum GraphError {
    /// The transport failed.
    #[error("graph request error: {source}")]
    RequestError {
        /// Underlying transport error
        source: TransportError,
        /// Status of the partial response, if one arrived
        status: Option<u16>,
        /// Headers of the partial response
        headers: Headers,
        /// Body bytes read before the failure
        body: Option<Vec<u8>>,
    },

    /// The response had no body.
    #[error("graph response was empty")]
    EmptyResponse {
        /// HTTP status code, if any
        status: Option<u16>,
    },

    /// The body was not a GraphQL envelope of the requested shape.
    #[error("could not decode graph response: {message}")]
    JsonDecodingError {
        /// The body as text
        response: String,
        /// Parser or decoder message
        message: String,
    },
}

/// Stable, copyable classification of a [`GraphError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphErrorKind {
    /// See [`GraphError::RequestError`].
    RequestError,
    /// See [`GraphError::EmptyResponse`].
    EmptyResponse,
    /// See [`GraphError::JsonDecodingError`].
    JsonDecodingError,
}

impl GraphErrorKind {
    /// Returns a short, stable name for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequestError => "graph_request_error",
            Self::EmptyResponse => "graph_empty_response",
            Self::JsonDecodingError => "graph_json_decoding_error",
        }
    }
}

impl std::fmt::Display for GraphErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GraphError {
    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> GraphErrorKind {
        match self {
            Self::RequestError { .. } => GraphErrorKind::RequestError,
            Self::EmptyResponse { .. } => GraphErrorKind::EmptyResponse,
            Self::JsonDecodingError { .. } => GraphErrorKind::JsonDecodingError,
        }
    }
}

/// Result type alias for GraphQL operations.
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_and_status() {
        let error = ApiError::RequestFailed {
            status: 404,
            headers: Headers::new(),
            body: None,
        };
        assert_eq!(error.kind(), ApiErrorKind::RequestFailed);
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.to_string(), "request failed with status 404");
    }

    #[test]
    fn test_error_envelope_parsed_lazily() {
        let error = ApiError::RequestFailed {
            status: 401,
            headers: Headers::new(),
            body: Some(
                br#"{"error_messages":["Bad login"],"ksr_code":"invalid_xauth_login","http_code":401}"#
                    .to_vec(),
            ),
        };
        let envelope = error.error_envelope();
        assert_eq!(
            envelope.as_ref().and_then(|e| e.ksr_code.as_deref()),
            Some("invalid_xauth_login")
        );
    }

    #[test]
    fn test_error_envelope_absent_for_other_kinds() {
        let error = ApiError::CouldNotDecodeJson("eof".into());
        assert!(error.error_envelope().is_none());
        assert!(error.is_unreadable_success());
    }

    #[test]
    fn test_network_error_is_not_unreadable_success() {
        let error = ApiError::Network {
            source: TransportError::Timeout { timeout_ms: 10 },
            status: Some(200),
            headers: Headers::new(),
            body: None,
        };
        assert!(!error.is_unreadable_success());
        assert_eq!(error.kind().as_str(), "network");
    }

    #[test]
    fn test_unexpected_content_type_display() {
        let error = ApiError::UnexpectedContentType {
            status: 200,
            content_type: None,
        };
        assert_eq!(error.to_string(), "unexpected content type (none)");
    }

    #[test]
    fn test_graph_kind() {
        let error = GraphError::EmptyResponse { status: Some(200) };
        assert_eq!(error.kind(), GraphErrorKind::EmptyResponse);
    }
}
