//! Request Builder
//!
//! Turns a route, a page cursor or a GraphQL query set into a
//! [`PreparedRequest`] using a server configuration and client identity
//! snapshot. Building is synchronous and never touches the network.

use ksapi_domain::request::JSON_CONTENT_TYPE;
use ksapi_domain::{
    ClientIdentity, HttpMethod, PageCursor, PreparedRequest, QuerySet, RequestBody,
    RouteDescriptor, ServerConfig,
};
use serde_json::json;
use url::Url;

use crate::error::{ApiError, ApiResult};

/// Builds transport-ready requests.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    server: &'a ServerConfig,
    identity: &'a ClientIdentity,
}

impl<'a> RequestBuilder<'a> {
    /// Creates a builder over the given snapshots.
    #[must_use]
    pub const fn new(server: &'a ServerConfig, identity: &'a ClientIdentity) -> Self {
        Self { server, identity }
    }

    /// Joins the route path onto the API base URL.
    ///
    /// Route paths are plain segments: a `?`, a `#`, an empty segment or a
    /// `.`/`..` segment (escaped or not) would retarget the request, so none
    /// is accepted.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRoute` if the path is rejected or the
    /// joined string is not a URL.
    pub fn route_url(&self, route: &RouteDescriptor) -> ApiResult<Url> {
        let invalid = |reason: String| ApiError::InvalidRoute {
            path: route.path.clone(),
            reason,
        };
        let path = route.path.trim_start_matches('/');
        if path.contains(['?', '#']) {
            return Err(invalid("path carries a query or fragment".to_string()));
        }
        if path.split('/').any(str::is_empty) {
            return Err(invalid("path contains an empty segment".to_string()));
        }
        if path.split('/').any(is_dot_segment) {
            return Err(invalid("path contains a dot segment".to_string()));
        }

        let base = self.server.api_base_url().as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(|e| invalid(e.to_string()))
    }

    /// Builds the request for a route.
    ///
    /// GET requests and uploads carry their parameters in the query string,
    /// in the order supplied. Other methods send them as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRoute` if the route path is unusable.
    pub fn build(&self, route: RouteDescriptor) -> ApiResult<PreparedRequest> {
        let mut url = self.route_url(&route)?;

        if route.params_in_url() && !route.query.is_empty() {
            url.query_pairs_mut().extend_pairs(route.query.to_pairs());
        }

        let body = match route.file {
            Some(file) => RequestBody::Multipart(file),
            None if route.method.has_body() => RequestBody::Json(route.query.to_json()),
            None => RequestBody::None,
        };

        Ok(self.prepare(route.method, url, body))
    }

    /// Builds a GET request for a server-supplied page cursor.
    ///
    /// The cursor is used verbatim as the target; only identity headers are
    /// attached.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidPaginationTarget` if the cursor is not an
    /// absolute http(s) URL.
    pub fn build_page(&self, cursor: &PageCursor) -> ApiResult<PreparedRequest> {
        let url = cursor
            .to_url()
            .map_err(|e| ApiError::InvalidPaginationTarget {
                target: cursor.as_str().to_string(),
                reason: e.to_string(),
            })?;
        Ok(self.prepare(HttpMethod::Get, url, RequestBody::None))
    }

    /// Builds the POST carrying a combined GraphQL query document.
    #[must_use]
    pub fn build_graphql(&self, queries: &QuerySet) -> PreparedRequest {
        let url = self.server.graphql_endpoint_url().clone();
        let body = RequestBody::Json(json!({ "query": queries.document() }));
        self.prepare(HttpMethod::Post, url, body)
    }

    fn prepare(&self, method: HttpMethod, url: Url, body: RequestBody) -> PreparedRequest {
        let mut request = PreparedRequest::new(method, url);
        request.headers = self.identity.headers();
        if matches!(body, RequestBody::Json(_)) {
            request.headers.set("Content-Type", JSON_CONTENT_TYPE);
        }
        request.body(body)
    }
}

fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ksapi_domain::{FileUpload, OauthToken, QueryField};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn server() -> ServerConfig {
        ServerConfig::custom("https://api.example.com/", "https://www.example.com/graph").unwrap()
    }

    #[test]
    fn test_get_url_is_base_plus_path_with_ordered_query() {
        let server = server();
        let identity = ClientIdentity::default();
        let route = RouteDescriptor::get("/v1/discover")
            .param("sort", "magic")
            .param("page", 2)
            .param("term", "board games & more");

        let request = RequestBuilder::new(&server, &identity).build(route).unwrap();

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.url.as_str(),
            "https://api.example.com/v1/discover?sort=magic&page=2&term=board+games+%26+more"
        );
        assert!(request.body.is_none());
        assert!(!request.headers.contains("Content-Type"));
    }

    #[test]
    fn test_get_without_params_has_no_query() {
        let server = server();
        let identity = ClientIdentity::default();
        let request = RequestBuilder::new(&server, &identity)
            .build(RouteDescriptor::get("v1/users/self"))
            .unwrap();

        assert_eq!(request.url.as_str(), "https://api.example.com/v1/users/self");
        assert_eq!(request.url.query(), None);
    }

    #[test]
    fn test_last_write_wins_per_key() {
        let server = server();
        let identity = ClientIdentity::default();
        let route = RouteDescriptor::get("/v1/activities")
            .param("count", 1)
            .param("page", 3)
            .param("count", 10);

        let request = RequestBuilder::new(&server, &identity).build(route).unwrap();

        assert_eq!(request.url.query(), Some("count=10&page=3"));
    }

    #[test]
    fn test_post_sends_params_as_json_body() {
        let server = server();
        let identity = ClientIdentity::default();
        let route = RouteDescriptor::post("/v1/users/reset").param("email", "ada@example.com");

        let request = RequestBuilder::new(&server, &identity).build(route).unwrap();

        assert_eq!(request.url.query(), None);
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"email": "ada@example.com"}))
        );
        assert_eq!(request.headers.get("content-type"), Some(JSON_CONTENT_TYPE));
    }

    #[test]
    fn test_post_without_params_sends_empty_object() {
        let server = server();
        let identity = ClientIdentity::default();
        let request = RequestBuilder::new(&server, &identity)
            .build(RouteDescriptor::post("/v1/projects/1/video/increment_start"))
            .unwrap();

        assert_eq!(request.body, RequestBody::Json(json!({})));
    }

    #[test]
    fn test_upload_is_multipart_with_params_in_url() {
        let server = server();
        let identity = ClientIdentity::default();
        let file = FileUpload::new("image", "photo.png", vec![1, 2, 3]);
        let route = RouteDescriptor::post("/v1/projects/1/updates/draft/images")
            .param("caption", "hi")
            .with_file(file.clone());

        let request = RequestBuilder::new(&server, &identity).build(route).unwrap();

        assert_eq!(request.url.query(), Some("caption=hi"));
        assert_eq!(request.body, RequestBody::Multipart(file));
        assert!(!request.headers.contains("Content-Type"));
    }

    #[test]
    fn test_identity_headers_and_auth_presence() {
        let server = server();
        let anonymous = ClientIdentity::default();
        let signed_in = anonymous.login(OauthToken::new("tok"));

        let route = RouteDescriptor::get("/v1/users/self");
        let without = RequestBuilder::new(&server, &anonymous)
            .build(route.clone())
            .unwrap();
        let with = RequestBuilder::new(&server, &signed_in).build(route).unwrap();

        assert!(!without.headers.contains("Authorization"));
        assert_eq!(with.headers.get("authorization"), Some("Bearer tok"));
        assert_eq!(
            with.headers.get("x-kickstarter-app-id"),
            Some("com.kickstarter.kickstarter")
        );
        assert_eq!(with.headers.get("accept-language"), Some("en"));
    }

    #[test]
    fn test_page_cursor_used_verbatim() {
        let server = server();
        let identity = ClientIdentity::default();
        let cursor = PageCursor::new("https://other.example.com/v1/activities?cursor=abc&count=10");

        let request = RequestBuilder::new(&server, &identity)
            .build_page(&cursor)
            .unwrap();

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url.as_str(), cursor.as_str());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_invalid_page_cursor_is_rejected() {
        let server = server();
        let identity = ClientIdentity::default();

        for raw in ["not a url", "mailto:ada@example.com", ""] {
            let error = RequestBuilder::new(&server, &identity)
                .build_page(&PageCursor::new(raw))
                .unwrap_err();
            assert!(matches!(
                error,
                ApiError::InvalidPaginationTarget { ref target, .. } if target == raw
            ));
        }
    }

    #[test]
    fn test_graphql_request() {
        let server = server();
        let identity = ClientIdentity::default();
        let queries = QuerySet::new(QueryField::new("rootCategories").leaves(["id", "name"]));

        let request = RequestBuilder::new(&server, &identity).build_graphql(&queries);

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url.as_str(), "https://www.example.com/graph");
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"query": "{ rootCategories { id name } }"}))
        );
    }

    #[test]
    fn test_escaped_segments_stay_in_the_path() {
        let server = server();
        let identity = ClientIdentity::default();
        let builder = RequestBuilder::new(&server, &identity);

        let url = builder
            .route_url(&RouteDescriptor::get("/v1/projects/..%2Fusers%2Fself"))
            .unwrap();
        assert_eq!(url.path(), "/v1/projects/..%2Fusers%2Fself");

        let url = builder
            .route_url(&RouteDescriptor::get("/v1/projects/caf%C3%A9"))
            .unwrap();
        assert_eq!(url.path(), "/v1/projects/caf%C3%A9");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_route_path_cannot_leave_its_segment() {
        let server = server();
        let identity = ClientIdentity::default();
        let builder = RequestBuilder::new(&server, &identity);

        for path in [
            "/v1/projects/..",
            "/v1/projects/../users/self",
            "/v1/projects/%2E%2e",
            "/v1/projects/.",
            "/v1/projects/lamp?member=true",
            "/v1/projects/lamp#frag",
            "/v1/projects/",
            "/v1//projects/lamp",
            "",
        ] {
            let error = builder.route_url(&RouteDescriptor::get(path)).unwrap_err();
            assert!(
                matches!(error, ApiError::InvalidRoute { path: ref rejected, .. } if rejected == path),
                "{path} was accepted"
            );
        }
    }
}
