//! Users and friends.

use serde::{Deserialize, Serialize};

use super::PageUrls;
use crate::pagination::PageCursor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<UserAvatar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_friend: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backed_projects_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<bool>,
}

impl User {
    /// A user with only the required fields set.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: None,
            is_friend: None,
            backed_projects_count: None,
            social: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAvatar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindFriendsEnvelope {
    #[serde(default)]
    pub contacts_imported: bool,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub urls: PageUrls,
}

impl FindFriendsEnvelope {
    #[must_use]
    pub fn next_page(&self) -> Option<PageCursor> {
        self.urls.next_page()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendStatsEnvelope {
    pub stats: FriendStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendStats {
    #[serde(default)]
    pub friend_projects_count: i64,
    #[serde(default)]
    pub remote_friends_count: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_user() {
        let user: User = serde_json::from_str(r#"{"id":1,"name":"Ada"}"#).unwrap();
        assert_eq!(user, User::new(1, "Ada"));
    }

    #[test]
    fn test_user_missing_name_fails() {
        let result = serde_json::from_str::<User>(r#"{"id":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_friends_next_page() {
        let envelope: FindFriendsEnvelope = serde_json::from_str(
            r#"{"users": [], "urls": {"api": {"more_users": "https://api.example.com/friends?page=2"}}}"#,
        )
        .unwrap();
        assert!(envelope.next_page().is_some());
        assert!(!envelope.contacts_imported);
    }
}
