//! HTTP request body builder.
//!
//! Turns the domain `RequestBody` into something reqwest can send, and
//! loads upload payloads from disk.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use ksapi_domain::{FileUpload, RequestBody};
use ksapi_domain::request::JSON_CONTENT_TYPE;
use reqwest::multipart::{Form, Part};

/// Error type for body building operations.
#[derive(Debug, thiserror::Error)]
pub enum BodyBuildError {
    /// Failed to read file.
    #[error("Failed to read file {path}: {message}")]
    FileReadError { path: PathBuf, message: String },

    /// Invalid body configuration.
    #[error("Invalid body configuration: {message}")]
    InvalidConfig { message: String },

    /// Serialization error.
    #[error("Serialization error: {message}")]
    SerializationError { message: String },
}

/// Result of building a body.
#[derive(Debug)]
pub enum BuiltBody {
    /// No body.
    None,
    /// Serialized JSON with its content type.
    Json {
        content: Vec<u8>,
        content_type: &'static str,
    },
    /// Multipart form data.
    Multipart(Form),
}

/// Build a reqwest body from the domain body.
///
/// # Errors
///
/// Returns `BodyBuildError` if the JSON cannot be serialized or the upload
/// carries an unusable MIME type.
pub fn build_body(body: RequestBody) -> Result<BuiltBody, BodyBuildError> {
    match body {
        RequestBody::None => Ok(BuiltBody::None),

        RequestBody::Json(value) => {
            let content =
                serde_json::to_vec(&value).map_err(|e| BodyBuildError::SerializationError {
                    message: e.to_string(),
                })?;
            Ok(BuiltBody::Json {
                content,
                content_type: JSON_CONTENT_TYPE,
            })
        }

        RequestBody::Multipart(upload) => build_multipart_form(upload).map(BuiltBody::Multipart),
    }
}

/// Build a multipart form holding one file part.
fn build_multipart_form(upload: FileUpload) -> Result<Form, BodyBuildError> {
    let FileUpload {
        field_name,
        file_name,
        mime_type,
        content,
    } = upload;

    let part = Part::bytes(content)
        .file_name(file_name)
        .mime_str(&mime_type)
        .map_err(|e| BodyBuildError::InvalidConfig {
            message: format!("Invalid MIME type {mime_type:?}: {e}"),
        })?;

    Ok(Form::new().part(field_name, part))
}

/// Reads a file into an upload sent under `field_name`.
///
/// The file name reported to the server is the path's last component and
/// the MIME type is guessed from its extension.
///
/// # Errors
///
/// Returns `BodyBuildError::FileReadError` if the file cannot be read.
pub async fn upload_from_path(
    field_name: impl Into<String>,
    path: impl AsRef<Path>,
) -> Result<FileUpload, BodyBuildError> {
    let path = path.as_ref();
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| BodyBuildError::FileReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file")
        .to_string();

    Ok(FileUpload::new(field_name, file_name, content))
}

impl BuiltBody {
    /// Get the Content-Type header value.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json { content_type, .. } => Some(*content_type),
            Self::None | Self::Multipart(_) => None, // reqwest sets this automatically with boundary
        }
    }
}
