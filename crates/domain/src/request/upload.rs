//! File upload payloads

/// A file attached to a route, sent as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Multipart field name the file is sent under (e.g. "image").
    pub field_name: String,
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type of the content.
    pub mime_type: String,
    /// Raw file content.
    pub content: Vec<u8>,
}

impl FileUpload {
    /// Creates an upload, guessing the MIME type from the file name.
    #[must_use]
    pub fn new(
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            field_name: field_name.into(),
            file_name,
            mime_type,
            content,
        }
    }

    /// Overrides the guessed MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Returns the content size in bytes.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the file is empty.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
