//! Project and update comments.

use serde::{Deserialize, Serialize};

use super::{PageUrls, User};
use crate::pagination::PageCursor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub body: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsEnvelope {
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub urls: PageUrls,
}

impl CommentsEnvelope {
    #[must_use]
    pub fn next_page(&self) -> Option<PageCursor> {
        self.urls.next_page()
    }
}
