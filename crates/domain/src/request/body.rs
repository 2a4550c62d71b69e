//! HTTP Request body types

use serde_json::Value;

use super::FileUpload;

/// Content type sent with JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// The body of a prepared request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON document
    Json(Value),
    /// Multipart upload with a single file part
    Multipart(FileUpload),
}

impl RequestBody {
    /// Returns whether the body is none.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the content type if it is known before transport.
    ///
    /// Multipart bodies return `None`: the transport sets the content type
    /// together with the generated boundary.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json(_) => Some(JSON_CONTENT_TYPE),
            Self::None | Self::Multipart(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_body() {
        let body = RequestBody::Json(json!({"key": "value"}));
        assert_eq!(body.content_type(), Some(JSON_CONTENT_TYPE));
        assert!(!body.is_none());
    }

    #[test]
    fn test_empty_body() {
        let body = RequestBody::default();
        assert!(body.is_none());
        assert_eq!(body.content_type(), None);
    }

    #[test]
    fn test_multipart_defers_content_type() {
        let body = RequestBody::Multipart(FileUpload::new("image", "a.jpg", vec![1]));
        assert_eq!(body.content_type(), None);
    }
}
