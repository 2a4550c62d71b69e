//! Activity feed.

use serde::{Deserialize, Serialize};

use super::{PageUrls, Project, User};
use crate::pagination::PageCursor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub category: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEnvelope {
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub urls: PageUrls,
}

/// A creator's activity feed for one project has the same shape.
pub type ProjectActivityEnvelope = ActivityEnvelope;

impl ActivityEnvelope {
    #[must_use]
    pub fn next_page(&self) -> Option<PageCursor> {
        self.urls.next_page()
    }
}
