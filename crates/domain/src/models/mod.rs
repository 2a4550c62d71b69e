//! Domain models decoded from API responses.
//!
//! The models only name the fields the client reads; unknown fields are
//! ignored and most fields are optional, since the backend omits them
//! freely depending on the endpoint.

#![allow(missing_docs)]

mod activity;
mod category;
mod comment;
mod envelope;
mod error_envelope;
mod message;
mod params;
mod project;
mod shipping;
mod stats;
mod survey;
mod update;
mod user;

pub use activity::{Activity, ActivityEnvelope, ProjectActivityEnvelope};
pub use category::{
    Category, CategoryEnvelope, GraphCategory, RootCategoriesEnvelope, SubcategoryConnection,
};
pub use comment::{Comment, CommentsEnvelope};
pub use envelope::{AccessTokenEnvelope, Config, MoreUrls, PageUrls, StarEnvelope, VoidEnvelope};
pub use error_envelope::ErrorEnvelope;
pub use message::{
    Mailbox, Message, MessageSubject, MessageThread, MessageThreadEnvelope, MessageThreadsEnvelope,
};
pub use params::{DiscoveryParams, DiscoverySort, ProjectParam};
pub use project::{
    Backing, DiscoveryEnvelope, NotificationProject, Project, ProjectNotification, ProjectsEnvelope,
};
pub use shipping::{Location, ShippingRule, ShippingRulesEnvelope};
pub use stats::{
    CumulativeStats, FundingDateStats, ProjectStatsEnvelope, ReferrerStats, RewardStats,
    VideoStats,
};
pub use survey::SurveyResponse;
pub use update::{Update, UpdateDraft, UpdateDraftImage, UpdateDraftVideo};
pub use user::{FindFriendsEnvelope, FriendStats, FriendStatsEnvelope, User, UserAvatar};
