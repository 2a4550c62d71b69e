//! Page cursors
//!
//! Listing endpoints return the URL of their next page. The cursor is used
//! verbatim as the next request target; its structure is never inspected
//! beyond confirming it is a well-formed absolute URL.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Opaque, server-supplied next-page URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCursor(String);

impl PageCursor {
    /// Wraps a raw cursor string without validating it.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw cursor string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the cursor as an absolute `http` or `https` URL.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` when the cursor is not a
    /// syntactically valid absolute HTTP URL.
    pub fn to_url(&self) -> DomainResult<Url> {
        let url = Url::parse(&self.0).map_err(|e| DomainError::InvalidUrl(e.to_string()))?;
        if matches!(url.scheme(), "http" | "https") && url.has_host() {
            Ok(url)
        } else {
            Err(DomainError::InvalidUrl(format!(
                "unsupported pagination target: {}",
                self.0
            )))
        }
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PageCursor {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for PageCursor {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}
