//! Server-side error payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON body the backend sends with most non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error_messages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ksr_code: Option<String>,
    #[serde(default)]
    pub http_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<Value>,
}

impl ErrorEnvelope {
    /// The first error message, if the server sent any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.error_messages.first().map(String::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_decodes() {
        let envelope: ErrorEnvelope = serde_json::from_str(
            r#"{"error_messages": ["Something went wrong"], "ksr_code": "access_token_invalid", "http_code": 401}"#,
        )
        .unwrap();
        assert_eq!(envelope.message(), Some("Something went wrong"));
        assert_eq!(envelope.ksr_code.as_deref(), Some("access_token_invalid"));
        assert_eq!(envelope.http_code, 401);
    }
}
