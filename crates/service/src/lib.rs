//! KsApi - typed access to the Kickstarter REST and GraphQL APIs
//!
//! [`Service`] is the entry point: one async method per backend operation,
//! each returning exactly one value or one typed failure.
//!
//! ```ignore
//! let settings = ConfigLoader::new().with_process_env().load().await?;
//! let service = Service::from_settings(&settings)?;
//!
//! let me = service.fetch_user_self().await?;
//! ```

pub mod route;
pub mod service;
pub mod telemetry;

pub use route::Route;
pub use service::Service;
pub use telemetry::init_tracing;

pub use ksapi_application::{
    ApiClient, ApiError, ApiErrorKind, ApiResult, DecodeError, Decoder, FnDecoder, GraphError,
    GraphErrorKind, GraphResult, JsonDecoder, OperationHandle,
};
pub use ksapi_domain::models;
pub use ksapi_domain::{
    ClientIdentity, EnvironmentType, FileUpload, Headers, OauthToken, PageCursor, QueryArgument,
    QueryField, QuerySet, ServerConfig,
};
