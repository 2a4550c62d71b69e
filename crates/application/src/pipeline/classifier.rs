//! Response Classifier
//!
//! Rules are evaluated in order; the first that matches decides:
//!
//! 1. transport error present: network error
//! 2. status outside `200..300`: request failed
//! 3. content type missing or not JSON: unexpected content type
//! 4. no body bytes: empty response body
//! 5. otherwise the body goes on to decoding

use ksapi_domain::Headers;
use mime::Mime;

use crate::error::{ApiError, ApiResult};
use crate::ports::{RawOutcome, TransportError};

/// A 2xx JSON response with a non-empty body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedBody {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Body bytes, never empty
    pub bytes: Vec<u8>,
}

/// Classifies a raw outcome.
///
/// # Errors
///
/// Returns the `ApiError` of the first rule that rejects the outcome.
pub fn classify(outcome: RawOutcome) -> ApiResult<ClassifiedBody> {
    let RawOutcome {
        status,
        headers,
        body,
        error,
    } = outcome;

    if let Some(source) = error {
        tracing::warn!(status = ?status, error = %source, "network error");
        return Err(ApiError::Network {
            source,
            status,
            headers,
            body,
        });
    }

    let Some(status) = status else {
        let source = TransportError::Other("no response received".to_string());
        tracing::warn!(error = %source, "network error");
        return Err(ApiError::Network {
            source,
            status: None,
            headers,
            body,
        });
    };

    if !(200..300).contains(&status) {
        tracing::warn!(status, "request failed");
        return Err(ApiError::RequestFailed {
            status,
            headers,
            body,
        });
    }

    let content_type = headers.get("content-type");
    if !content_type.is_some_and(is_json) {
        tracing::warn!(status, content_type = ?content_type, "unexpected content type");
        return Err(ApiError::UnexpectedContentType {
            status,
            content_type: content_type.map(str::to_string),
        });
    }

    match body {
        Some(bytes) if !bytes.is_empty() => Ok(ClassifiedBody {
            status,
            headers,
            bytes,
        }),
        _ => {
            tracing::warn!(status, "empty response body");
            Err(ApiError::EmptyResponseBody { status })
        }
    }
}

/// Returns true for `application/json` and `application/*+json`.
pub(crate) fn is_json(content_type: &str) -> bool {
    content_type.parse::<Mime>().is_ok_and(|mime| {
        mime.type_() == mime::APPLICATION
            && (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
    })
}
