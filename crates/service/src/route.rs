//! Route catalog
//!
//! Every REST operation the service exposes is a [`Route`]; each route
//! knows its method, path and parameters.

use std::borrow::Cow;

use ksapi_domain::models::{DiscoveryParams, Mailbox, MessageSubject, ProjectParam};
use ksapi_domain::{FileUpload, RouteDescriptor};

/// Activity categories requested by the activity feed.
pub const ACTIVITY_CATEGORIES: [&str; 7] = [
    "backing",
    "cancellation",
    "failure",
    "follow",
    "launch",
    "success",
    "update",
];

/// Multipart field name for draft image uploads.
pub const IMAGE_FIELD: &str = "image";

/// Multipart field name for draft video uploads.
pub const VIDEO_FIELD: &str = "video";

/// One REST endpoint with its arguments.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Route {
    Activities {
        count: Option<u32>,
    },
    AddImage {
        project_id: i64,
        file: FileUpload,
    },
    AddVideo {
        project_id: i64,
        file: FileUpload,
    },
    Comments {
        project_id: i64,
    },
    Config,
    DeleteImage {
        project_id: i64,
        image_id: i64,
    },
    DeleteVideo {
        project_id: i64,
    },
    Discover(DiscoveryParams),
    FollowAllFriends,
    FollowFriend {
        user_id: i64,
    },
    FriendStats,
    Friends,
    IncrementVideoCompletion {
        project_id: i64,
    },
    IncrementVideoStart {
        project_id: i64,
    },
    Login {
        email: String,
        password: String,
        code: Option<String>,
    },
    MarkAsRead {
        thread_id: i64,
    },
    MessageThread {
        thread_id: i64,
    },
    MessageThreadForBacking {
        project_id: i64,
        backer_id: i64,
    },
    MessageThreads {
        mailbox: Mailbox,
        project_id: Option<i64>,
    },
    PostComment {
        project_id: i64,
        body: String,
    },
    PostUpdateComment {
        project_id: i64,
        update_id: i64,
        body: String,
    },
    Project(ProjectParam),
    ProjectActivities {
        project_id: i64,
    },
    ProjectNotifications,
    ProjectStats {
        project_id: i64,
    },
    Projects {
        member: bool,
    },
    PublishUpdateDraft {
        project_id: i64,
    },
    RegisterPushToken {
        token: String,
    },
    ResetPassword {
        email: String,
    },
    SearchMessages {
        query: String,
        project_id: Option<i64>,
    },
    SendMessage {
        body: String,
        subject: MessageSubject,
    },
    ShippingRules {
        project_id: i64,
        reward_id: i64,
    },
    Signup {
        name: String,
        email: String,
        password: String,
        password_confirmation: String,
        send_newsletters: bool,
    },
    Star {
        project_id: i64,
    },
    SurveyResponse {
        survey_response_id: i64,
    },
    ToggleStar {
        project_id: i64,
    },
    UnansweredSurveyResponses,
    UnfollowFriend {
        user_id: i64,
    },
    Update {
        update_id: i64,
        project: ProjectParam,
    },
    UpdateComments {
        project_id: i64,
        update_id: i64,
    },
    UpdateDraft {
        project_id: i64,
    },
    UpdateProjectNotification {
        notification_id: i64,
        email: bool,
        mobile: bool,
    },
    UpdateUpdateDraft {
        project_id: i64,
        title: String,
        body: String,
        is_public: bool,
    },
    UpdateUserSelf {
        name: String,
        social: Option<bool>,
    },
    User {
        user_id: i64,
    },
    UserProjectsBacked,
    UserSelf,
}

impl Route {
    /// Builds the descriptor the request builder consumes.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn descriptor(self) -> RouteDescriptor {
        match self {
            Self::Activities { count } => RouteDescriptor::get("/v1/activities")
                .param("categories", ACTIVITY_CATEGORIES.to_vec())
                .param_opt("count", count),
            Self::AddImage { project_id, file } => {
                let file = FileUpload {
                    field_name: IMAGE_FIELD.to_string(),
                    ..file
                };
                RouteDescriptor::post(format!("/v1/projects/{project_id}/updates/draft/images"))
                    .with_file(file)
            }
            Self::AddVideo { project_id, file } => {
                let file = FileUpload {
                    field_name: VIDEO_FIELD.to_string(),
                    ..file
                };
                RouteDescriptor::post(format!("/v1/projects/{project_id}/updates/draft/video"))
                    .with_file(file)
            }
            Self::Comments { project_id } => {
                RouteDescriptor::get(format!("/v1/projects/{project_id}/comments"))
            }
            Self::Config => RouteDescriptor::get("/v1/app/ios/config"),
            Self::DeleteImage {
                project_id,
                image_id,
            } => RouteDescriptor::delete(format!(
                "/v1/projects/{project_id}/updates/draft/images/{image_id}"
            )),
            Self::DeleteVideo { project_id } => {
                RouteDescriptor::delete(format!("/v1/projects/{project_id}/updates/draft/video"))
            }
            Self::Discover(params) => RouteDescriptor::get("/v1/discover").with_query(params.to_query()),
            Self::FollowAllFriends => RouteDescriptor::put("/v1/users/self/friends/follow_all"),
            Self::FollowFriend { user_id } => {
                RouteDescriptor::put(format!("/v1/users/self/friends/{user_id}/follow"))
            }
            Self::FriendStats => RouteDescriptor::get("/v1/users/self/friends/stats"),
            Self::Friends => RouteDescriptor::get("/v1/users/self/friends"),
            Self::IncrementVideoCompletion { project_id } => RouteDescriptor::post(format!(
                "/v1/projects/{project_id}/video/increment_complete"
            )),
            Self::IncrementVideoStart { project_id } => RouteDescriptor::post(format!(
                "/v1/projects/{project_id}/video/increment_start"
            )),
            Self::Login {
                email,
                password,
                code,
            } => RouteDescriptor::post("/xauth/access_token")
                .param("email", email)
                .param("password", password)
                .param_opt("code", code),
            Self::MarkAsRead { thread_id } => {
                RouteDescriptor::put(format!("/v1/message_threads/{thread_id}/read"))
            }
            Self::MessageThread { thread_id } => {
                RouteDescriptor::get(format!("/v1/message_threads/{thread_id}"))
            }
            Self::MessageThreadForBacking {
                project_id,
                backer_id,
            } => RouteDescriptor::get(format!(
                "/v1/projects/{project_id}/backers/{backer_id}/messages"
            )),
            Self::MessageThreads {
                mailbox,
                project_id: Some(project_id),
            } => RouteDescriptor::get(format!(
                "/v1/projects/{project_id}/message_threads/{}",
                mailbox.as_str()
            )),
            Self::MessageThreads {
                mailbox,
                project_id: None,
            } => RouteDescriptor::get(format!("/v1/message_threads/{}", mailbox.as_str())),
            Self::PostComment { project_id, body } => {
                RouteDescriptor::post(format!("/v1/projects/{project_id}/comments"))
                    .param("body", body)
            }
            Self::PostUpdateComment {
                project_id,
                update_id,
                body,
            } => RouteDescriptor::post(format!(
                "/v1/projects/{project_id}/updates/{update_id}/comments"
            ))
            .param("body", body),
            Self::Project(param) => {
                RouteDescriptor::get(format!("/v1/projects/{}", project_segment(&param)))
            }
            Self::ProjectActivities { project_id } => {
                RouteDescriptor::get(format!("/v1/projects/{project_id}/activities"))
            }
            Self::ProjectNotifications => RouteDescriptor::get("/v1/users/self/notifications"),
            Self::Projects { member } => {
                RouteDescriptor::get("/v1/users/self/projects").param("member", member)
            }
            Self::PublishUpdateDraft { project_id } => RouteDescriptor::post(format!(
                "/v1/projects/{project_id}/updates/draft/publish"
            )),
            Self::RegisterPushToken { token } => {
                RouteDescriptor::post("/v1/users/self/ios/push_tokens").param("token", token)
            }
            Self::ResetPassword { email } => {
                RouteDescriptor::post("/v1/users/reset").param("email", email)
            }
            Self::SearchMessages { query, project_id } => {
                RouteDescriptor::get("/v1/message_threads/search")
                    .param("q", query)
                    .param_opt("project_id", project_id)
            }
            Self::SendMessage { body, subject } => {
                let path = match subject {
                    MessageSubject::MessageThread(thread_id) => {
                        format!("/v1/message_threads/{thread_id}/messages")
                    }
                    MessageSubject::Backing {
                        project_id,
                        backer_id,
                    } => format!("/v1/projects/{project_id}/backers/{backer_id}/messages"),
                    MessageSubject::Project(project_id) => {
                        format!("/v1/projects/{project_id}/messages")
                    }
                };
                RouteDescriptor::post(path).param("body", body)
            }
            Self::ShippingRules {
                project_id,
                reward_id,
            } => RouteDescriptor::get(format!(
                "/v1/projects/{project_id}/rewards/{reward_id}/shipping_rules"
            )),
            Self::Signup {
                name,
                email,
                password,
                password_confirmation,
                send_newsletters,
            } => RouteDescriptor::post("/v1/users")
                .param("name", name)
                .param("email", email)
                .param("password", password)
                .param("password_confirmation", password_confirmation)
                .param("send_newsletters", send_newsletters),
            Self::Star { project_id } => {
                RouteDescriptor::put(format!("/v1/projects/{project_id}/star"))
            }
            Self::ProjectStats { project_id } => {
                RouteDescriptor::get(format!("/v1/projects/{project_id}/stats"))
            }
            Self::SurveyResponse { survey_response_id } => {
                RouteDescriptor::get(format!("/v1/survey_responses/{survey_response_id}"))
            }
            Self::ToggleStar { project_id } => {
                RouteDescriptor::post(format!("/v1/projects/{project_id}/star/toggle"))
            }
            Self::UnansweredSurveyResponses => {
                RouteDescriptor::get("/v1/users/self/surveys/unanswered")
            }
            Self::UnfollowFriend { user_id } => {
                RouteDescriptor::delete(format!("/v1/users/self/friends/{user_id}/follow"))
            }
            Self::Update {
                update_id,
                project,
            } => RouteDescriptor::get(format!(
                "/v1/projects/{}/updates/{update_id}",
                project_segment(&project)
            )),
            Self::UpdateComments {
                project_id,
                update_id,
            } => RouteDescriptor::get(format!(
                "/v1/projects/{project_id}/updates/{update_id}/comments"
            )),
            Self::UpdateDraft { project_id } => {
                RouteDescriptor::get(format!("/v1/projects/{project_id}/updates/draft"))
            }
            Self::UpdateProjectNotification {
                notification_id,
                email,
                mobile,
            } => RouteDescriptor::put(format!("/v1/users/self/notifications/{notification_id}"))
                .param("email", email)
                .param("mobile", mobile),
            Self::UpdateUpdateDraft {
                project_id,
                title,
                body,
                is_public,
            } => RouteDescriptor::put(format!("/v1/projects/{project_id}/updates/draft"))
                .param("title", title)
                .param("body", body)
                .param("public", is_public),
            Self::UpdateUserSelf { name, social } => RouteDescriptor::put("/v1/users/self")
                .param("name", name)
                .param_opt("social", social),
            Self::User { user_id } => RouteDescriptor::get(format!("/v1/users/{user_id}")),
            Self::UserProjectsBacked => RouteDescriptor::get("/v1/users/self/projects/backed"),
            Self::UserSelf => RouteDescriptor::get("/v1/users/self"),
        }
    }
}

/// Renders a project id or slug as a single escaped path segment.
fn project_segment(param: &ProjectParam) -> Cow<'_, str> {
    match param {
        ProjectParam::Id(id) => Cow::Owned(id.to_string()),
        ProjectParam::Slug(slug) => urlencoding::encode(slug),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ksapi_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_user_self() {
        let route = Route::UserSelf.descriptor();
        assert_eq!(route.method, HttpMethod::Get);
        assert_eq!(route.path, "/v1/users/self");
        assert!(route.query.is_empty());
    }

    #[test]
    fn test_activities_carry_categories_and_count() {
        let route = Route::Activities { count: Some(5) }.descriptor();

        assert_eq!(
            route.query.get("categories"),
            Some(&json!([
                "backing",
                "cancellation",
                "failure",
                "follow",
                "launch",
                "success",
                "update"
            ]))
        );
        assert_eq!(route.query.get("count"), Some(&json!(5)));
    }

    #[test]
    fn test_login_omits_missing_code() {
        let route = Route::Login {
            email: "ada@example.com".into(),
            password: "secret".into(),
            code: None,
        }
        .descriptor();

        assert_eq!(route.method, HttpMethod::Post);
        assert_eq!(route.path, "/xauth/access_token");
        assert_eq!(route.query.len(), 2);
        assert!(route.query.get("code").is_none());
    }

    #[test]
    fn test_project_by_slug() {
        let route = Route::Project(ProjectParam::from("sunset-print")).descriptor();
        assert_eq!(route.path, "/v1/projects/sunset-print");
    }

    #[test]
    fn test_slug_is_one_escaped_segment() {
        let cases = [
            ("../users/self", "/v1/projects/..%2Fusers%2Fself"),
            ("lamp?member=true", "/v1/projects/lamp%3Fmember%3Dtrue"),
            ("a#frag", "/v1/projects/a%23frag"),
            ("café-lamp", "/v1/projects/caf%C3%A9-lamp"),
            ("desk lamp/2", "/v1/projects/desk%20lamp%2F2"),
        ];

        for (slug, path) in cases {
            let route = Route::Project(ProjectParam::Slug(slug.to_string())).descriptor();
            assert_eq!(route.path, path);
        }
    }

    #[test]
    fn test_update_escapes_project_slug() {
        let route = Route::Update {
            update_id: 4,
            project: ProjectParam::Slug("sunset/print".to_string()),
        }
        .descriptor();
        assert_eq!(route.path, "/v1/projects/sunset%2Fprint/updates/4");
    }

    #[test]
    fn test_send_message_targets_subject() {
        let paths = [
            (MessageSubject::MessageThread(5), "/v1/message_threads/5/messages"),
            (
                MessageSubject::Backing {
                    project_id: 3,
                    backer_id: 8,
                },
                "/v1/projects/3/backers/8/messages",
            ),
            (MessageSubject::Project(3), "/v1/projects/3/messages"),
        ];

        for (subject, path) in paths {
            let route = Route::SendMessage {
                body: "Hi".into(),
                subject,
            }
            .descriptor();
            assert_eq!(route.method, HttpMethod::Post);
            assert_eq!(route.path, path);
            assert_eq!(route.query.get("body"), Some(&json!("Hi")));
        }
    }

    #[test]
    fn test_search_messages_scoped_to_project() {
        let route = Route::SearchMessages {
            query: "refund".into(),
            project_id: Some(7),
        }
        .descriptor();

        assert_eq!(route.path, "/v1/message_threads/search");
        assert_eq!(route.query.get("q"), Some(&json!("refund")));
        assert_eq!(route.query.get("project_id"), Some(&json!(7)));
    }

    #[test]
    fn test_update_draft_sends_public_flag() {
        let route = Route::UpdateUpdateDraft {
            project_id: 7,
            title: "Week two".into(),
            body: "Progress".into(),
            is_public: true,
        }
        .descriptor();

        assert_eq!(route.method, HttpMethod::Put);
        assert_eq!(route.path, "/v1/projects/7/updates/draft");
        assert_eq!(route.query.get("public"), Some(&json!(true)));
    }

    #[test]
    fn test_add_video_forces_field_name() {
        let route = Route::AddVideo {
            project_id: 3,
            file: FileUpload::new("upload", "clip.mp4", vec![1]),
        }
        .descriptor();

        assert_eq!(route.path, "/v1/projects/3/updates/draft/video");
        assert_eq!(route.file.map(|f| f.field_name), Some("video".to_string()));
    }

    #[test]
    fn test_message_threads_scoped_to_project() {
        let all = Route::MessageThreads {
            mailbox: Mailbox::Inbox,
            project_id: None,
        }
        .descriptor();
        let scoped = Route::MessageThreads {
            mailbox: Mailbox::Sent,
            project_id: Some(7),
        }
        .descriptor();

        assert_eq!(all.path, "/v1/message_threads/inbox");
        assert_eq!(scoped.path, "/v1/projects/7/message_threads/sent");
    }

    #[test]
    fn test_add_image_forces_field_name() {
        let file = FileUpload::new("upload", "cover.png", vec![1]);
        let route = Route::AddImage {
            project_id: 3,
            file,
        }
        .descriptor();

        assert_eq!(route.path, "/v1/projects/3/updates/draft/images");
        assert_eq!(route.file.map(|f| f.field_name), Some("image".to_string()));
    }

    #[test]
    fn test_unfollow_is_delete() {
        let route = Route::UnfollowFriend { user_id: 4 }.descriptor();
        assert_eq!(route.method, HttpMethod::Delete);
        assert_eq!(route.path, "/v1/users/self/friends/4/follow");
    }
}
