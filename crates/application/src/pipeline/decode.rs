//! Decoder Adapter
//!
//! Parses a classified body as JSON and hands it to the caller's decoder in
//! one of three modes: single required value, single optional value, or an
//! ordered sequence.

use serde_json::Value;

use super::ClassifiedBody;
use crate::error::{ApiError, ApiResult};
use crate::ports::{DecodeError, Decoder};

/// Decodes exactly one value.
///
/// # Errors
///
/// Returns `ApiError::CouldNotDecodeJson` on a parse failure, a shape
/// mismatch, or an absent value.
pub fn decode_single<T, D>(body: &ClassifiedBody, decoder: &D) -> ApiResult<T>
where
    D: Decoder<T> + ?Sized,
{
    let value = parse::<T>(body)?;
    decoder.decode(value).map_err(|e| decode_failure::<T>(&e))
}

/// Decodes zero or one value; an absent value is not a failure.
///
/// # Errors
///
/// Returns `ApiError::CouldNotDecodeJson` on a parse failure or a shape
/// mismatch.
pub fn decode_optional<T, D>(body: &ClassifiedBody, decoder: &D) -> ApiResult<Option<T>>
where
    D: Decoder<T> + ?Sized,
{
    let value = parse::<T>(body)?;
    match decoder.decode(value) {
        Ok(decoded) => Ok(Some(decoded)),
        Err(DecodeError::Absent) => Ok(None),
        Err(e) => Err(decode_failure::<T>(&e)),
    }
}

/// Decodes a JSON array element by element.
///
/// Any element failure fails the whole sequence.
///
/// # Errors
///
/// Returns `ApiError::CouldNotDecodeJson` if the body is not an array or
/// any element does not decode.
pub fn decode_sequence<T, D>(body: &ClassifiedBody, decoder: &D) -> ApiResult<Vec<T>>
where
    D: Decoder<T> + ?Sized,
{
    let Value::Array(items) = parse::<T>(body)? else {
        let error = DecodeError::Shape("expected a JSON array".to_string());
        return Err(decode_failure::<T>(&error));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            decoder.decode(item).map_err(|e| {
                decode_failure::<T>(&DecodeError::Shape(format!("element {index}: {e}")))
            })
        })
        .collect()
}

fn parse<T>(body: &ClassifiedBody) -> ApiResult<Value> {
    serde_json::from_slice(&body.bytes).map_err(|e| {
        tracing::warn!(
            target_type = std::any::type_name::<T>(),
            error = %e,
            "response body is not valid JSON"
        );
        ApiError::CouldNotDecodeJson(e.to_string())
    })
}

fn decode_failure<T>(error: &DecodeError) -> ApiError {
    tracing::warn!(
        target_type = std::any::type_name::<T>(),
        error = %error,
        "could not decode response"
    );
    ApiError::CouldNotDecodeJson(error.to_string())
}
