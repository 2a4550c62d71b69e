//! Small response envelopes shared across endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Project, User};
use crate::identity::OauthToken;
use crate::pagination::PageCursor;

/// The `urls` block listing endpoints attach to their envelopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageUrls {
    #[serde(default)]
    pub api: MoreUrls,
}

/// Next-page link; each listing names it differently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoreUrls {
    #[serde(
        default,
        alias = "more_activities",
        alias = "more_comments",
        alias = "more_projects",
        alias = "more_message_threads",
        alias = "more_users",
        skip_serializing_if = "Option::is_none"
    )]
    pub more: Option<String>,
}

impl PageUrls {
    /// Cursor for the next page, when there is one.
    #[must_use]
    pub fn next_page(&self) -> Option<PageCursor> {
        self.api
            .more
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(PageCursor::from)
    }
}

/// Body-less acknowledgment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoidEnvelope {}

/// Result of a login or signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenEnvelope {
    pub access_token: String,
    pub user: User,
}

impl AccessTokenEnvelope {
    /// The token to log the client in with.
    #[must_use]
    pub fn token(&self) -> OauthToken {
        OauthToken::new(self.access_token.clone())
    }
}

/// Result of starring a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarEnvelope {
    pub user: User,
    pub project: Project,
}

/// Remote application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub country_code: String,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub features: BTreeMap<String, bool>,
    #[serde(default)]
    pub ab_experiments: BTreeMap<String, String>,
}
