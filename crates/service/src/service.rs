//! Operation facade
//!
//! [`Service`] exposes one method per backend operation. Each method picks
//! a [`Route`], a target type and a decoding mode, and hands the rest to
//! the [`ApiClient`] pipeline.

use ksapi_application::{
    ApiClient, ApiError, ApiResult, GraphResult, JsonDecoder, OperationHandle, Transport,
    TransportError,
};
use ksapi_domain::models::{
    AccessTokenEnvelope, ActivityEnvelope, Backing, CategoryEnvelope, Comment, CommentsEnvelope,
    Config, DiscoveryEnvelope, DiscoveryParams, FindFriendsEnvelope, FriendStatsEnvelope, Mailbox,
    Message, MessageSubject, MessageThread, MessageThreadEnvelope, MessageThreadsEnvelope, Project,
    ProjectActivityEnvelope, ProjectNotification, ProjectParam, ProjectStatsEnvelope,
    ProjectsEnvelope, RootCategoriesEnvelope, ShippingRulesEnvelope, StarEnvelope, SurveyResponse,
    Update, UpdateDraft, UpdateDraftImage, UpdateDraftVideo, User, VoidEnvelope,
};
use ksapi_domain::{ClientIdentity, FileUpload, OauthToken, PageCursor, QuerySet, ServerConfig};
use ksapi_infrastructure::{ClientSettings, ReqwestTransport};
use serde::de::DeserializeOwned;
use std::future::Future;
use url::Url;

use crate::route::Route;

/// The typed KsApi facade.
///
/// Cloning is cheap and clones share the connection pool. [`login`],
/// [`logout`] and [`with_server_config`] return a new service; requests
/// already in flight on the old one are unaffected.
///
/// # Errors
///
/// Every request method returns the pipeline's `ApiError` (or `GraphError`
/// for the GraphQL methods) as its single failure.
///
/// [`login`]: Service::login
/// [`logout`]: Service::logout
/// [`with_server_config`]: Service::with_server_config
pub struct Service<C = ReqwestTransport> {
    client: ApiClient<C>,
}

impl<C> Clone for Service<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<C> std::fmt::Debug for Service<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("client", &self.client)
            .finish()
    }
}

impl Service<ReqwestTransport> {
    /// Builds a service over a reqwest transport configured from `settings`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidRequest` if the HTTP client cannot
    /// be constructed.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::with_config(&settings.transport)?;
        Ok(Self::new(
            transport,
            settings.server.clone(),
            settings.identity.clone(),
        ))
    }
}

#[allow(clippy::missing_errors_doc)]
impl<C: Transport> Service<C> {
    /// Creates a service owning `transport`.
    pub fn new(transport: C, server: ServerConfig, identity: ClientIdentity) -> Self {
        Self::from_client(ApiClient::new(transport, server, identity))
    }

    /// Wraps an existing client.
    pub const fn from_client(client: ApiClient<C>) -> Self {
        Self { client }
    }

    /// The underlying pipeline client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient<C> {
        &self.client
    }

    /// The server configuration in use.
    #[must_use]
    pub fn server_config(&self) -> &ServerConfig {
        self.client.server()
    }

    /// The identity requests are issued under.
    #[must_use]
    pub fn identity(&self) -> &ClientIdentity {
        self.client.identity()
    }

    /// Returns a service that authenticates with `token`.
    #[must_use]
    pub fn login(&self, token: OauthToken) -> Self {
        Self::from_client(self.client.with_identity(self.identity().login(token)))
    }

    /// Returns a service without credentials.
    #[must_use]
    pub fn logout(&self) -> Self {
        Self::from_client(self.client.with_identity(self.identity().logout()))
    }

    /// Returns a service targeting another environment.
    #[must_use]
    pub fn with_server_config(&self, server: ServerConfig) -> Self {
        Self::from_client(self.client.with_server_config(server))
    }

    /// Runs `operation` on the runtime with a clone of this service and
    /// returns a handle that can cancel it.
    pub fn spawn<T, F, Fut>(&self, operation: F) -> OperationHandle<T>
    where
        C: 'static,
        T: Send + 'static,
        F: FnOnce(Self) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        OperationHandle::spawn(operation(self.clone()))
    }

    // Users

    /// Fetches the logged-in user.
    pub async fn fetch_user_self(&self) -> ApiResult<User> {
        self.single(Route::UserSelf).await
    }

    /// Fetches a user by id.
    pub async fn fetch_user(&self, user_id: i64) -> ApiResult<User> {
        self.single(Route::User { user_id }).await
    }

    /// Saves the editable fields of the logged-in user.
    pub async fn update_user_self(&self, user: &User) -> ApiResult<User> {
        self.single(Route::UpdateUserSelf {
            name: user.name.clone(),
            social: user.social,
        })
        .await
    }

    /// Requests a password reset email.
    pub async fn reset_password(&self, email: &str) -> ApiResult<User> {
        self.single(Route::ResetPassword {
            email: email.to_string(),
        })
        .await
    }

    /// Exchanges credentials for an access token.
    ///
    /// The returned service is not changed; pass
    /// [`AccessTokenEnvelope::token`] to [`login`](Self::login).
    pub async fn login_with_credentials(
        &self,
        email: &str,
        password: &str,
        code: Option<&str>,
    ) -> ApiResult<AccessTokenEnvelope> {
        self.single(Route::Login {
            email: email.to_string(),
            password: password.to_string(),
            code: code.map(str::to_string),
        })
        .await
    }

    /// Creates an account.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
        send_newsletters: bool,
    ) -> ApiResult<AccessTokenEnvelope> {
        self.single(Route::Signup {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password_confirmation: password_confirmation.to_string(),
            send_newsletters,
        })
        .await
    }

    /// Fetches the app configuration.
    pub async fn fetch_config(&self) -> ApiResult<Config> {
        self.single(Route::Config).await
    }

    // Activity

    /// Fetches the first page of the activity feed.
    pub async fn fetch_activities(&self, count: Option<u32>) -> ApiResult<ActivityEnvelope> {
        self.single(Route::Activities { count }).await
    }

    /// Fetches a later page of the activity feed.
    pub async fn fetch_activities_page(
        &self,
        cursor: &PageCursor,
    ) -> ApiResult<ActivityEnvelope> {
        self.page(cursor).await
    }

    // Comments

    /// Fetches the first page of a project's comments.
    pub async fn fetch_comments(&self, project: &Project) -> ApiResult<CommentsEnvelope> {
        self.single(Route::Comments {
            project_id: project.id,
        })
        .await
    }

    /// Fetches the first page of an update's comments.
    pub async fn fetch_update_comments(&self, update: &Update) -> ApiResult<CommentsEnvelope> {
        self.single(Route::UpdateComments {
            project_id: update.project_id,
            update_id: update.id,
        })
        .await
    }

    /// Fetches a later page of comments.
    pub async fn fetch_comments_page(&self, cursor: &PageCursor) -> ApiResult<CommentsEnvelope> {
        self.page(cursor).await
    }

    /// Posts a comment on a project.
    pub async fn post_comment(&self, body: &str, project: &Project) -> ApiResult<Comment> {
        self.single(Route::PostComment {
            project_id: project.id,
            body: body.to_string(),
        })
        .await
    }

    /// Posts a comment on an update.
    pub async fn post_update_comment(&self, body: &str, update: &Update) -> ApiResult<Comment> {
        self.single(Route::PostUpdateComment {
            project_id: update.project_id,
            update_id: update.id,
            body: body.to_string(),
        })
        .await
    }

    // Projects

    /// Runs a discovery search.
    pub async fn fetch_discovery(&self, params: &DiscoveryParams) -> ApiResult<DiscoveryEnvelope> {
        self.single(Route::Discover(params.clone())).await
    }

    /// Fetches a later page of discovery results.
    pub async fn fetch_discovery_page(
        &self,
        cursor: &PageCursor,
    ) -> ApiResult<DiscoveryEnvelope> {
        self.page(cursor).await
    }

    /// Fetches a project by id or slug.
    pub async fn fetch_project(&self, param: impl Into<ProjectParam>) -> ApiResult<Project> {
        self.single(Route::Project(param.into())).await
    }

    /// Fetches projects the user created (`member = false`) or collaborates
    /// on (`member = true`).
    pub async fn fetch_projects(&self, member: bool) -> ApiResult<ProjectsEnvelope> {
        self.single(Route::Projects { member }).await
    }

    /// Fetches a later page of the user's projects.
    pub async fn fetch_projects_page(&self, cursor: &PageCursor) -> ApiResult<ProjectsEnvelope> {
        self.page(cursor).await
    }

    /// Fetches the projects the user backed.
    pub async fn fetch_user_projects_backed(&self) -> ApiResult<ProjectsEnvelope> {
        self.single(Route::UserProjectsBacked).await
    }

    /// Fetches a later page of backed projects.
    pub async fn fetch_user_projects_backed_page(
        &self,
        cursor: &PageCursor,
    ) -> ApiResult<ProjectsEnvelope> {
        self.page(cursor).await
    }

    /// Fetches the first page of a creator's activity on one project.
    pub async fn fetch_project_activities(
        &self,
        project: &Project,
    ) -> ApiResult<ProjectActivityEnvelope> {
        self.single(Route::ProjectActivities {
            project_id: project.id,
        })
        .await
    }

    /// Fetches a later page of project activity.
    pub async fn fetch_project_activities_page(
        &self,
        cursor: &PageCursor,
    ) -> ApiResult<ProjectActivityEnvelope> {
        self.page(cursor).await
    }

    /// Fetches the creator dashboard statistics of a project.
    pub async fn fetch_project_stats(&self, project_id: i64) -> ApiResult<ProjectStatsEnvelope> {
        self.single(Route::ProjectStats { project_id }).await
    }

    /// Fetches where a reward ships and at what cost.
    pub async fn fetch_reward_shipping_rules(
        &self,
        project_id: i64,
        reward_id: i64,
    ) -> ApiResult<ShippingRulesEnvelope> {
        self.single(Route::ShippingRules {
            project_id,
            reward_id,
        })
        .await
    }

    /// Stars a project.
    pub async fn star(&self, project: &Project) -> ApiResult<StarEnvelope> {
        self.single(Route::Star {
            project_id: project.id,
        })
        .await
    }

    /// Toggles the star on a project.
    pub async fn toggle_star(&self, project: &Project) -> ApiResult<StarEnvelope> {
        self.single(Route::ToggleStar {
            project_id: project.id,
        })
        .await
    }

    /// Records that a project video started playing.
    ///
    /// The backend may acknowledge with an empty or non-JSON body, so any
    /// failure after a 2xx status counts as success.
    pub async fn increment_video_start(&self, project: &Project) -> ApiResult<VoidEnvelope> {
        self.acknowledge(Route::IncrementVideoStart {
            project_id: project.id,
        })
        .await
    }

    /// Records that a project video played to the end.
    ///
    /// Same acknowledgment handling as
    /// [`increment_video_start`](Self::increment_video_start).
    pub async fn increment_video_completion(
        &self,
        project: &Project,
    ) -> ApiResult<VoidEnvelope> {
        self.acknowledge(Route::IncrementVideoCompletion {
            project_id: project.id,
        })
        .await
    }

    // Notifications

    /// Fetches the per-project notification settings.
    pub async fn fetch_project_notifications(&self) -> ApiResult<Vec<ProjectNotification>> {
        self.client
            .request_sequence(Route::ProjectNotifications.descriptor(), &JsonDecoder::new())
            .await
    }

    /// Saves one project's notification settings.
    pub async fn update_project_notification(
        &self,
        notification: &ProjectNotification,
    ) -> ApiResult<ProjectNotification> {
        self.single(Route::UpdateProjectNotification {
            notification_id: notification.id,
            email: notification.email,
            mobile: notification.mobile,
        })
        .await
    }

    /// Registers a device push token.
    pub async fn register_push_token(&self, token: &str) -> ApiResult<VoidEnvelope> {
        self.single(Route::RegisterPushToken {
            token: token.to_string(),
        })
        .await
    }

    // Surveys

    /// Fetches survey responses the user has not answered.
    pub async fn fetch_unanswered_survey_responses(&self) -> ApiResult<Vec<SurveyResponse>> {
        self.client
            .request_sequence(
                Route::UnansweredSurveyResponses.descriptor(),
                &JsonDecoder::new(),
            )
            .await
    }

    /// Fetches one survey response.
    pub async fn fetch_survey_response(&self, survey_response_id: i64) -> ApiResult<SurveyResponse> {
        self.single(Route::SurveyResponse { survey_response_id })
            .await
    }

    // Messages

    /// Fetches a message thread with its messages.
    pub async fn fetch_message_thread(&self, thread_id: i64) -> ApiResult<MessageThreadEnvelope> {
        self.single(Route::MessageThread { thread_id }).await
    }

    /// Fetches the thread attached to a backing, if one exists.
    pub async fn fetch_message_thread_for_backing(
        &self,
        backing: &Backing,
    ) -> ApiResult<Option<MessageThreadEnvelope>> {
        let route = Route::MessageThreadForBacking {
            project_id: backing.project_id,
            backer_id: backing.backer_id,
        };
        self.client
            .request_optional(route.descriptor(), &JsonDecoder::new())
            .await
    }

    /// Fetches the first page of a mailbox, optionally scoped to a project.
    pub async fn fetch_message_threads(
        &self,
        mailbox: Mailbox,
        project: Option<&Project>,
    ) -> ApiResult<MessageThreadsEnvelope> {
        self.single(Route::MessageThreads {
            mailbox,
            project_id: project.map(|p| p.id),
        })
        .await
    }

    /// Fetches a later page of message threads.
    pub async fn fetch_message_threads_page(
        &self,
        cursor: &PageCursor,
    ) -> ApiResult<MessageThreadsEnvelope> {
        self.page(cursor).await
    }

    /// Searches the user's message threads, optionally within one project.
    pub async fn search_messages(
        &self,
        query: &str,
        project: Option<&Project>,
    ) -> ApiResult<MessageThreadsEnvelope> {
        self.single(Route::SearchMessages {
            query: query.to_string(),
            project_id: project.map(|p| p.id),
        })
        .await
    }

    /// Sends a message to a thread, a backing's creator or a project's creator.
    pub async fn send_message(
        &self,
        body: &str,
        subject: impl Into<MessageSubject>,
    ) -> ApiResult<Message> {
        self.single(Route::SendMessage {
            body: body.to_string(),
            subject: subject.into(),
        })
        .await
    }

    /// Marks a thread as read.
    pub async fn mark_as_read(&self, thread: &MessageThread) -> ApiResult<MessageThread> {
        self.single(Route::MarkAsRead {
            thread_id: thread.id,
        })
        .await
    }

    // Friends

    /// Fetches the first page of friends to follow.
    pub async fn fetch_friends(&self) -> ApiResult<FindFriendsEnvelope> {
        self.single(Route::Friends).await
    }

    /// Fetches a later page of friends.
    pub async fn fetch_friends_page(&self, cursor: &PageCursor) -> ApiResult<FindFriendsEnvelope> {
        self.page(cursor).await
    }

    /// Fetches friend counts.
    pub async fn fetch_friend_stats(&self) -> ApiResult<FriendStatsEnvelope> {
        self.single(Route::FriendStats).await
    }

    /// Follows a user.
    pub async fn follow_friend(&self, user: &User) -> ApiResult<User> {
        self.single(Route::FollowFriend { user_id: user.id })
            .await
    }

    /// Unfollows a user.
    pub async fn unfollow_friend(&self, user: &User) -> ApiResult<VoidEnvelope> {
        self.single(Route::UnfollowFriend { user_id: user.id })
            .await
    }

    /// Follows every friend.
    pub async fn follow_all_friends(&self) -> ApiResult<VoidEnvelope> {
        self.single(Route::FollowAllFriends).await
    }

    // Updates

    /// Fetches one published update of a project.
    pub async fn fetch_update(
        &self,
        update_id: i64,
        project: impl Into<ProjectParam>,
    ) -> ApiResult<Update> {
        self.single(Route::Update {
            update_id,
            project: project.into(),
        })
        .await
    }

    /// Fetches the project's update draft.
    pub async fn fetch_update_draft(&self, project: &Project) -> ApiResult<UpdateDraft> {
        self.single(Route::UpdateDraft {
            project_id: project.id,
        })
        .await
    }

    /// Uploads an image to a draft. The upload is always sent under the
    /// `image` field.
    pub async fn add_image(
        &self,
        file: FileUpload,
        draft: &UpdateDraft,
    ) -> ApiResult<UpdateDraftImage> {
        self.single(Route::AddImage {
            project_id: draft.update.project_id,
            file,
        })
        .await
    }

    /// Removes an image from a draft.
    pub async fn delete_image(
        &self,
        image: &UpdateDraftImage,
        draft: &UpdateDraft,
    ) -> ApiResult<UpdateDraftImage> {
        self.single(Route::DeleteImage {
            project_id: draft.update.project_id,
            image_id: image.id,
        })
        .await
    }

    /// Uploads a video to a draft under the `video` field.
    pub async fn add_video(
        &self,
        file: FileUpload,
        draft: &UpdateDraft,
    ) -> ApiResult<UpdateDraftVideo> {
        self.single(Route::AddVideo {
            project_id: draft.update.project_id,
            file,
        })
        .await
    }

    /// Removes the video from a draft.
    pub async fn delete_video(&self, draft: &UpdateDraft) -> ApiResult<UpdateDraftVideo> {
        self.single(Route::DeleteVideo {
            project_id: draft.update.project_id,
        })
        .await
    }

    /// Saves the title, body and visibility of a draft.
    pub async fn update_draft(
        &self,
        draft: &UpdateDraft,
        title: &str,
        body: &str,
        is_public: bool,
    ) -> ApiResult<UpdateDraft> {
        self.single(Route::UpdateUpdateDraft {
            project_id: draft.update.project_id,
            title: title.to_string(),
            body: body.to_string(),
            is_public,
        })
        .await
    }

    /// Publishes a draft.
    pub async fn publish(&self, draft: &UpdateDraft) -> ApiResult<Update> {
        self.single(Route::PublishUpdateDraft {
            project_id: draft.update.project_id,
        })
        .await
    }

    /// The web preview URL of a draft. No request is made.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRoute` if the URL cannot be formed.
    pub fn preview_url(&self, draft: &UpdateDraft) -> ApiResult<Url> {
        let route = Route::UpdateDraft {
            project_id: draft.update.project_id,
        }
        .descriptor();
        let mut url = self.client.builder().route_url(&route)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidRoute {
                path: route.path.clone(),
                reason: "base URL cannot carry a path".to_string(),
            })?
            .push("preview");
        Ok(url)
    }

    // GraphQL

    /// Fetches the root categories selected by `queries`.
    pub async fn fetch_graph_categories(
        &self,
        queries: &QuerySet,
    ) -> GraphResult<Option<RootCategoriesEnvelope>> {
        self.client.fetch_graph(queries, &JsonDecoder::new()).await
    }

    /// Fetches one category node selected by `queries`.
    pub async fn fetch_graph_category(
        &self,
        queries: &QuerySet,
    ) -> GraphResult<Option<CategoryEnvelope>> {
        self.client.fetch_graph(queries, &JsonDecoder::new()).await
    }

    async fn single<T: DeserializeOwned>(&self, route: Route) -> ApiResult<T> {
        self.client
            .request(route.descriptor(), &JsonDecoder::new())
            .await
    }

    async fn page<T: DeserializeOwned>(&self, cursor: &PageCursor) -> ApiResult<T> {
        self.client.request_page(cursor, &JsonDecoder::new()).await
    }

    async fn acknowledge(&self, route: Route) -> ApiResult<VoidEnvelope> {
        match self.single(route).await {
            Err(error) if error.is_unreadable_success() => {
                tracing::debug!(kind = %error.kind(), "accepting unreadable acknowledgment");
                Ok(VoidEnvelope::default())
            }
            result => result,
        }
    }
}
