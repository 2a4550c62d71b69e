//! Projects, backings and project listings.

use serde::{Deserialize, Serialize};

use super::{Category, PageUrls, User};
use crate::pagination::PageCursor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blurb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pledged: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backers_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_starred: Option<bool>,
}

impl Project {
    /// A project with only the required fields set.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: None,
            blurb: None,
            state: None,
            goal: None,
            pledged: None,
            backers_count: None,
            category: None,
            creator: None,
            is_starred: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backing {
    pub id: i64,
    pub project_id: i64,
    pub backer_id: i64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryEnvelope {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub urls: PageUrls,
}

impl DiscoveryEnvelope {
    #[must_use]
    pub fn next_page(&self) -> Option<PageCursor> {
        self.urls.next_page()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectsEnvelope {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub urls: PageUrls,
}

impl ProjectsEnvelope {
    #[must_use]
    pub fn next_page(&self) -> Option<PageCursor> {
        self.urls.next_page()
    }
}

/// Per-project notification preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectNotification {
    pub id: i64,
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub mobile: bool,
    pub project: NotificationProject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationProject {
    pub id: i64,
    pub name: String,
}
