//! GraphQL response envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a GraphQL `errors` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlErrorMessage {
    /// Human-readable message
    pub message: String,
    /// Response path the error applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
}

/// The top-level body of a GraphQL response.
///
/// `data` may be absent or `null`; that is a valid, empty outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct GraphResponse<T> {
    /// The requested shape
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Errors reported alongside the data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQlErrorMessage>>,
}

impl<T> GraphResponse<T> {
    /// Returns the reported errors, if any.
    #[must_use]
    pub fn errors(&self) -> &[GraphQlErrorMessage] {
        self.errors.as_deref().unwrap_or_default()
    }
}
