//! GraphQL outcome handling
//!
//! The GraphQL path has its own taxonomy and does not look at the status
//! code or content type: a readable envelope is all it needs.

use ksapi_domain::GraphResponse;
use serde_json::Value;

use crate::error::{GraphError, GraphResult};
use crate::ports::{DecodeError, Decoder, RawOutcome};

/// Unwraps the `data` field of a GraphQL response.
///
/// An absent or `null` `data` yields `Ok(None)`. An `errors` list is
/// logged and otherwise ignored.
///
/// # Errors
///
/// Returns `GraphError::RequestError` on transport failure,
/// `GraphError::EmptyResponse` when no body arrived, and
/// `GraphError::JsonDecodingError` when the body is not an envelope or
/// `data` does not fit `T`.
pub fn handle_graph_outcome<T, D>(outcome: RawOutcome, decoder: &D) -> GraphResult<Option<T>>
where
    D: Decoder<T> + ?Sized,
{
    let RawOutcome {
        status,
        headers,
        body,
        error,
    } = outcome;

    if let Some(source) = error {
        tracing::warn!(status = ?status, error = %source, "graph request error");
        return Err(GraphError::RequestError {
            source,
            status,
            headers,
            body,
        });
    }

    let bytes = match body {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => {
            tracing::warn!(status = ?status, "graph response was empty");
            return Err(GraphError::EmptyResponse { status });
        }
    };

    let envelope: GraphResponse<Value> =
        serde_json::from_slice(&bytes).map_err(|e| json_error(&bytes, e.to_string()))?;

    for error in envelope.errors() {
        tracing::warn!(message = %error.message, path = ?error.path, "graph query reported an error");
    }

    match envelope.data {
        None | Some(Value::Null) => Ok(None),
        Some(data) => match decoder.decode(data) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(DecodeError::Absent) => Ok(None),
            Err(DecodeError::Shape(message)) => Err(json_error(&bytes, message)),
        },
    }
}

fn json_error(bytes: &[u8], message: String) -> GraphError {
    tracing::warn!(error = %message, "could not decode graph response");
    GraphError::JsonDecodingError {
        response: String::from_utf8_lossy(bytes).into_owned(),
        message,
    }
}
