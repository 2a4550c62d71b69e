//! KsApi Domain - Core types for the API access layer
//!
//! This crate defines the data model shared by the request pipeline and
//! the operation facade. All types here are pure Rust with no I/O
//! dependencies.

pub mod error;
pub mod graphql;
pub mod id;
pub mod identity;
pub mod models;
pub mod pagination;
pub mod request;
pub mod server;

pub use error::{DomainError, DomainResult};
pub use graphql::{GraphQlErrorMessage, GraphResponse, QueryArgument, QueryField, QuerySet};
pub use id::generate_request_id;
pub use identity::{ClientIdentity, OauthToken};
pub use pagination::PageCursor;
pub use request::{
    FileUpload, Header, Headers, HttpMethod, PreparedRequest, QueryParams, RequestBody,
    RouteDescriptor,
};
pub use server::{EnvironmentType, ServerConfig};
