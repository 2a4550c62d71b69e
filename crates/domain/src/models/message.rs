//! Messages between backers and creators.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Backing, PageUrls, Project, User};
use crate::pagination::PageCursor;

/// Which side of the conversation list to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mailbox {
    #[default]
    Inbox,
    Sent,
}

impl Mailbox {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Sent => "sent",
        }
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a new message goes: an existing thread, the creator of a
/// backing, or a project's creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageSubject {
    MessageThread(i64),
    Backing { project_id: i64, backer_id: i64 },
    Project(i64),
}

impl From<&MessageThread> for MessageSubject {
    fn from(thread: &MessageThread) -> Self {
        Self::MessageThread(thread.id)
    }
}

impl From<&Backing> for MessageSubject {
    fn from(backing: &Backing) -> Self {
        Self::Backing {
            project_id: backing.project_id,
            backer_id: backing.backer_id,
        }
    }
}

impl From<&Project> for MessageSubject {
    fn from(project: &Project) -> Self {
        Self::Project(project.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub body: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageThread {
    pub id: i64,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub unread_messages_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageThreadEnvelope {
    pub message_thread: MessageThread,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub participants: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageThreadsEnvelope {
    #[serde(default)]
    pub message_threads: Vec<MessageThread>,
    #[serde(default)]
    pub urls: PageUrls,
}

impl MessageThreadsEnvelope {
    #[must_use]
    pub fn next_page(&self) -> Option<PageCursor> {
        self.urls.next_page()
    }
}
