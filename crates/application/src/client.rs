//! API client
//!
//! [`ApiClient`] owns the transport and the configuration snapshots and
//! drives a request through build, execute, classify and decode.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use ksapi_domain::{ClientIdentity, PageCursor, PreparedRequest, QuerySet, RouteDescriptor, ServerConfig};

use crate::error::{ApiResult, GraphResult};
use crate::operation::OperationHandle;
use crate::pipeline::{
    ClassifiedBody, RequestBuilder, classify, decode_optional, decode_sequence, decode_single,
    handle_graph_outcome,
};
use crate::ports::{Decoder, RawOutcome, Transport};

/// Client for the REST and GraphQL endpoints.
///
/// Cloning is cheap; clones share the transport and its connection pool.
/// The server configuration and identity are immutable snapshots: changing
/// either produces a new client, so requests already in flight keep the
/// snapshot they were issued under.
///
/// # Example
///
/// ```ignore
/// let client = ApiClient::new(ReqwestTransport::new()?, ServerConfig::production(), ClientIdentity::default());
///
/// let user: User = client
///     .request(RouteDescriptor::get("/v1/users/self"), &JsonDecoder::new())
///     .await?;
/// ```
pub struct ApiClient<C> {
    transport: Arc<C>,
    server: Arc<ServerConfig>,
    identity: Arc<ClientIdentity>,
}

impl<C> Clone for ApiClient<C> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            server: Arc::clone(&self.server),
            identity: Arc::clone(&self.identity),
        }
    }
}

impl<C> std::fmt::Debug for ApiClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("server", &self.server)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl<C: Transport> ApiClient<C> {
    /// Creates a client owning `transport`.
    pub fn new(transport: C, server: ServerConfig, identity: ClientIdentity) -> Self {
        Self::with_shared_transport(Arc::new(transport), server, identity)
    }

    /// Creates a client over an already shared transport.
    pub fn with_shared_transport(
        transport: Arc<C>,
        server: ServerConfig,
        identity: ClientIdentity,
    ) -> Self {
        Self {
            transport,
            server: Arc::new(server),
            identity: Arc::new(identity),
        }
    }

    /// Returns a client issuing requests under `identity`.
    #[must_use]
    pub fn with_identity(&self, identity: ClientIdentity) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            server: Arc::clone(&self.server),
            identity: Arc::new(identity),
        }
    }

    /// Returns a client targeting `server`.
    #[must_use]
    pub fn with_server_config(&self, server: ServerConfig) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            server: Arc::new(server),
            identity: Arc::clone(&self.identity),
        }
    }

    /// The server configuration snapshot.
    #[must_use]
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// The client identity snapshot.
    #[must_use]
    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    /// The shared transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<C> {
        &self.transport
    }

    /// Returns a request builder over this client's snapshots.
    #[must_use]
    pub fn builder(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(&self.server, &self.identity)
    }

    /// Requests a route and decodes exactly one value.
    ///
    /// # Errors
    ///
    /// Returns the first `ApiError` raised by building, classifying or
    /// decoding.
    pub async fn request<T, D>(&self, route: RouteDescriptor, decoder: &D) -> ApiResult<T>
    where
        D: Decoder<T> + ?Sized,
    {
        let body = self.execute_route(route).await?;
        decode_single(&body, decoder)
    }

    /// Requests a route and decodes zero or one value.
    ///
    /// # Errors
    ///
    /// As [`request`](Self::request), except that an absent value is
    /// `Ok(None)`.
    pub async fn request_optional<T, D>(
        &self,
        route: RouteDescriptor,
        decoder: &D,
    ) -> ApiResult<Option<T>>
    where
        D: Decoder<T> + ?Sized,
    {
        let body = self.execute_route(route).await?;
        decode_optional(&body, decoder)
    }

    /// Requests a route and decodes a JSON array.
    ///
    /// # Errors
    ///
    /// As [`request`](Self::request); any bad element fails the whole call.
    pub async fn request_sequence<T, D>(
        &self,
        route: RouteDescriptor,
        decoder: &D,
    ) -> ApiResult<Vec<T>>
    where
        D: Decoder<T> + ?Sized,
    {
        let body = self.execute_route(route).await?;
        decode_sequence(&body, decoder)
    }

    /// Fetches the page a server-supplied cursor points at.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidPaginationTarget` without touching the
    /// network if the cursor is not an absolute http(s) URL; otherwise as
    /// [`request`](Self::request).
    pub async fn request_page<T, D>(&self, cursor: &PageCursor, decoder: &D) -> ApiResult<T>
    where
        D: Decoder<T> + ?Sized,
    {
        let body = self.execute_page(cursor).await?;
        decode_single(&body, decoder)
    }

    /// Fetches a cursor page holding zero or one value.
    ///
    /// # Errors
    ///
    /// As [`request_page`](Self::request_page), except that an absent value
    /// is `Ok(None)`.
    pub async fn request_page_optional<T, D>(
        &self,
        cursor: &PageCursor,
        decoder: &D,
    ) -> ApiResult<Option<T>>
    where
        D: Decoder<T> + ?Sized,
    {
        let body = self.execute_page(cursor).await?;
        decode_optional(&body, decoder)
    }

    /// Fetches a cursor page holding a JSON array.
    ///
    /// # Errors
    ///
    /// As [`request_page`](Self::request_page); any bad element fails the
    /// whole call.
    pub async fn request_page_sequence<T, D>(
        &self,
        cursor: &PageCursor,
        decoder: &D,
    ) -> ApiResult<Vec<T>>
    where
        D: Decoder<T> + ?Sized,
    {
        let body = self.execute_page(cursor).await?;
        decode_sequence(&body, decoder)
    }

    /// Posts a combined query document to the GraphQL endpoint.
    ///
    /// Returns `Ok(None)` when the response carries no `data`.
    ///
    /// # Errors
    ///
    /// Returns a `GraphError` on transport failure, an empty body, or an
    /// undecodable envelope.
    pub async fn fetch_graph<T, D>(&self, queries: &QuerySet, decoder: &D) -> GraphResult<Option<T>>
    where
        D: Decoder<T> + ?Sized,
    {
        let request = self.builder().build_graphql(queries);
        let outcome = self.send(request).await;
        handle_graph_outcome(outcome, decoder)
    }

    /// Runs `operation` with a clone of this client on the tokio runtime.
    ///
    /// The returned handle can cancel the operation; a cancelled operation
    /// delivers neither a value nor a failure.
    pub fn spawn<T, F, Fut>(&self, operation: F) -> OperationHandle<T>
    where
        C: 'static,
        T: Send + 'static,
        F: FnOnce(Self) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        OperationHandle::spawn(operation(self.clone()))
    }

    async fn execute_route(&self, route: RouteDescriptor) -> ApiResult<ClassifiedBody> {
        let request = self.builder().build(route)?;
        self.execute(request).await
    }

    async fn execute_page(&self, cursor: &PageCursor) -> ApiResult<ClassifiedBody> {
        let request = self.builder().build_page(cursor)?;
        self.execute(request).await
    }

    async fn execute(&self, request: PreparedRequest) -> ApiResult<ClassifiedBody> {
        classify(self.send(request).await)
    }

    async fn send(&self, request: PreparedRequest) -> RawOutcome {
        let request_id = request.id;
        tracing::debug!(
            %request_id,
            method = %request.method,
            url = %request.url,
            "sending request"
        );

        let started = Instant::now();
        let outcome = self.transport.execute(request).await;

        tracing::debug!(
            %request_id,
            status = ?outcome.status,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "request finished"
        );
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ApiErrorKind, GraphErrorKind};
    use crate::ports::{JsonDecoder, TransportError, cancellation_pair};
    use crate::run_cancellable;
    use crate::testing::{PendingTransport, ScriptedTransport, json_response};
    use ksapi_domain::{HttpMethod, OauthToken, QueryField};
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use std::time::Duration;

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        id: i64,
        name: String,
    }

    fn client(transport: ScriptedTransport) -> ApiClient<ScriptedTransport> {
        let server =
            ServerConfig::custom("https://api.example.com", "https://www.example.com/graph")
                .unwrap();
        ApiClient::new(transport, server, ClientIdentity::default())
    }

    #[tokio::test]
    async fn test_fetch_user_self() {
        let transport = ScriptedTransport::new([json_response(200, r#"{"id":1,"name":"Ada"}"#)]);
        let client = client(transport);

        let user: User = client
            .request(RouteDescriptor::get("/v1/users/self"), &JsonDecoder::new())
            .await
            .unwrap();

        assert_eq!(
            user,
            User {
                id: 1,
                name: "Ada".to_string()
            }
        );
        let sent = client.transport().requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url.as_str(), "https://api.example.com/v1/users/self");
        assert_eq!(sent[0].method, HttpMethod::Get);
    }

    #[tokio::test]
    async fn test_not_found_is_request_failed() {
        let transport = ScriptedTransport::new([json_response(404, r#"{"id":1,"name":"Ada"}"#)]);
        let client = client(transport);

        let error = client
            .request::<User, _>(RouteDescriptor::get("/v1/users/9"), &JsonDecoder::new())
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ApiErrorKind::RequestFailed);
        assert_eq!(error.status(), Some(404));
    }

    #[tokio::test]
    async fn test_network_error_propagates() {
        let transport = ScriptedTransport::new([RawOutcome::failed(TransportError::ConnectionRefused {
            host: "api.example.com".into(),
            port: 443,
        })]);
        let client = client(transport);

        let error = client
            .request::<User, _>(RouteDescriptor::get("/v1/users/self"), &JsonDecoder::new())
            .await
            .unwrap_err();

        assert!(matches!(error, ApiError::Network { status: None, .. }));
    }

    #[tokio::test]
    async fn test_optional_and_sequence_modes() {
        let transport = ScriptedTransport::new([
            json_response(200, "null"),
            json_response(200, r#"[{"id":1,"name":"Ada"},{"id":2,"name":"Grace"}]"#),
        ]);
        let client = client(transport);

        let none: Option<User> = client
            .request_optional(RouteDescriptor::get("/v1/a"), &JsonDecoder::new())
            .await
            .unwrap();
        let users: Vec<User> = client
            .request_sequence(RouteDescriptor::get("/v1/b"), &JsonDecoder::new())
            .await
            .unwrap();

        assert_eq!(none, None);
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_cursor_never_reaches_transport() {
        let client = client(ScriptedTransport::new([]));

        let error = client
            .request_page::<User, _>(&PageCursor::new("not a url"), &JsonDecoder::new())
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ApiErrorKind::InvalidPaginationTarget);
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_page_request_targets_cursor() {
        let transport = ScriptedTransport::new([json_response(200, r#"{"id":2,"name":"Grace"}"#)]);
        let client = client(transport);
        let cursor = PageCursor::new("https://api.example.com/v1/users?cursor=2");

        let user: User = client
            .request_page(&cursor, &JsonDecoder::new())
            .await
            .unwrap();

        assert_eq!(user.id, 2);
        assert_eq!(client.transport().requests()[0].url.as_str(), cursor.as_str());
    }

    #[tokio::test]
    async fn test_page_optional_and_sequence_modes() {
        let transport = ScriptedTransport::new([
            json_response(200, "null"),
            json_response(200, r#"[{"id":3,"name":"Hedy"},{"id":4,"name":"Joan"}]"#),
        ]);
        let client = client(transport);
        let first = PageCursor::new("https://api.example.com/v1/backing?cursor=1");
        let second = PageCursor::new("https://api.example.com/v1/users?cursor=3");

        let none: Option<User> = client
            .request_page_optional(&first, &JsonDecoder::new())
            .await
            .unwrap();
        let users: Vec<User> = client
            .request_page_sequence(&second, &JsonDecoder::new())
            .await
            .unwrap();

        assert_eq!(none, None);
        assert_eq!(users[1].name, "Joan");
        let sent = client.transport().requests();
        assert_eq!(sent[0].url.as_str(), first.as_str());
        assert_eq!(sent[1].url.as_str(), second.as_str());
    }

    #[tokio::test]
    async fn test_page_sequence_rejects_bad_cursor() {
        let client = client(ScriptedTransport::new([]));

        let error = client
            .request_page_sequence::<User, _>(
                &PageCursor::new("ftp://example.com/list"),
                &JsonDecoder::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ApiErrorKind::InvalidPaginationTarget);
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_graph_null_data() {
        let transport = ScriptedTransport::new([json_response(200, r#"{"data": null}"#)]);
        let client = client(transport);
        let queries = QuerySet::new(QueryField::new("rootCategories").leaves(["id"]));

        let result = client
            .fetch_graph::<User, _>(&queries, &JsonDecoder::new())
            .await
            .unwrap();

        assert_eq!(result, None);
        let sent = client.transport().requests();
        assert_eq!(sent[0].url.as_str(), "https://www.example.com/graph");
        assert_eq!(sent[0].method, HttpMethod::Post);
    }

    #[tokio::test]
    async fn test_graph_empty_body() {
        let transport = ScriptedTransport::new([RawOutcome::response(200, Default::default(), None)]);
        let client = client(transport);
        let queries = QuerySet::new(QueryField::new("me").leaves(["id"]));

        let error = client
            .fetch_graph::<User, _>(&queries, &JsonDecoder::new())
            .await
            .unwrap_err();

        assert_eq!(error.kind(), GraphErrorKind::EmptyResponse);
    }

    #[tokio::test]
    async fn test_identity_swap_leaves_original_untouched() {
        let transport = ScriptedTransport::new([
            json_response(200, r#"{"id":1,"name":"Ada"}"#),
            json_response(200, r#"{"id":1,"name":"Ada"}"#),
        ]);
        let anonymous = client(transport);
        let signed_in = anonymous.with_identity(anonymous.identity().login(OauthToken::new("tok")));

        let _: User = signed_in
            .request(RouteDescriptor::get("/v1/users/self"), &JsonDecoder::new())
            .await
            .unwrap();
        let _: User = anonymous
            .request(RouteDescriptor::get("/v1/users/self"), &JsonDecoder::new())
            .await
            .unwrap();

        let sent = anonymous.transport().requests();
        assert_eq!(sent[0].headers.get("authorization"), Some("Bearer tok"));
        assert!(!sent[1].headers.contains("authorization"));
        assert!(Arc::ptr_eq(anonymous.transport(), signed_in.transport()));
    }

    #[tokio::test]
    async fn test_cancel_in_flight_delivers_nothing() {
        let transport = PendingTransport::new();
        let dropped = transport.dropped_flag();
        let client = ApiClient::new(transport, ServerConfig::production(), ClientIdentity::default());

        let handle = client.spawn(|client| async move {
            client
                .request::<User, _>(RouteDescriptor::get("/v1/users/self"), &JsonDecoder::new())
                .await
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();

        assert!(handle.join().await.is_none());
        assert!(dropped.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_run_cancellable_with_external_token() {
        let client = ApiClient::new(
            PendingTransport::new(),
            ServerConfig::production(),
            ClientIdentity::default(),
        );
        let (token, receiver) = cancellation_pair();
        let decoder = JsonDecoder::new();

        let operation = client.request::<User, _>(RouteDescriptor::get("/v1/users/self"), &decoder);
        let canceller = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        };

        let (result, ()) = tokio::join!(run_cancellable(operation, receiver), canceller);
        assert!(result.is_none());
    }
}
