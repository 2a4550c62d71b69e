//! Decoder port
//!
//! A decoder turns an already-parsed JSON value into a typed domain value.
//! Callers pass the decoder explicitly alongside the target type.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Why a JSON value could not become a `T`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The value does not have the expected shape.
    #[error("{0}")]
    Shape(String),

    /// The value is a legitimate "nothing here" (e.g. `null`).
    #[error("no value present")]
    Absent,
}

/// Capability to turn a JSON value into `T`.
pub trait Decoder<T>: Send + Sync {
    /// Decodes one value.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Absent` for a structurally valid absent value,
    /// `DecodeError::Shape` for anything else that does not fit.
    fn decode(&self, value: Value) -> Result<T, DecodeError>;
}

/// Serde-backed decoder for any `DeserializeOwned` type.
///
/// A `null` that `T` cannot represent is reported as `Absent`.
pub struct JsonDecoder<T> {
    target: PhantomData<fn() -> T>,
}

impl<T> JsonDecoder<T> {
    /// Creates the decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            target: PhantomData,
        }
    }
}

impl<T> Default for JsonDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonDecoder<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for JsonDecoder<T> {}

impl<T> fmt::Debug for JsonDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsonDecoder<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> Decoder<T> for JsonDecoder<T> {
    fn decode(&self, value: Value) -> Result<T, DecodeError> {
        let was_null = value.is_null();
        serde_json::from_value(value).map_err(|e| {
            if was_null {
                DecodeError::Absent
            } else {
                DecodeError::Shape(e.to_string())
            }
        })
    }
}

/// Adapts a plain function into a [`Decoder`].
pub struct FnDecoder<F> {
    decode: F,
}

impl<F> FnDecoder<F> {
    /// Wraps `decode`.
    pub const fn new(decode: F) -> Self {
        Self { decode }
    }
}

impl<T, F> Decoder<T> for FnDecoder<F>
where
    F: Fn(Value) -> Result<T, DecodeError> + Send + Sync,
{
    fn decode(&self, value: Value) -> Result<T, DecodeError> {
        (self.decode)(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        id: i64,
        name: String,
    }

    #[test]
    fn test_json_decoder_success() {
        let decoder = JsonDecoder::<User>::new();
        let user = decoder.decode(json!({"id": 1, "name": "Ada"}));
        assert_eq!(
            user,
            Ok(User {
                id: 1,
                name: "Ada".to_string()
            })
        );
    }

    #[test]
    fn test_json_decoder_shape_mismatch() {
        let decoder = JsonDecoder::<User>::new();
        let result = decoder.decode(json!({"id": "one"}));
        assert!(matches!(result, Err(DecodeError::Shape(_))));
    }

    #[test]
    fn test_json_decoder_null_is_absent() {
        let decoder = JsonDecoder::<User>::new();
        assert_eq!(decoder.decode(Value::Null), Err(DecodeError::Absent));
    }

    #[test]
    fn test_null_decodes_when_target_allows_it() {
        let decoder = JsonDecoder::<Option<User>>::new();
        assert_eq!(decoder.decode(Value::Null), Ok(None));
    }

    #[test]
    fn test_fn_decoder() {
        let decoder = FnDecoder::new(|value: Value| {
            value
                .get("count")
                .and_then(Value::as_i64)
                .ok_or(DecodeError::Absent)
        });
        assert_eq!(decoder.decode(json!({"count": 3})), Ok(3));
        assert_eq!(decoder.decode(json!({})), Err(DecodeError::Absent));
    }
}
