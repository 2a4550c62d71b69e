//! HTTP request domain types
//!
//! A [`RouteDescriptor`] describes one logical API operation; the request
//! builder turns it into a transport-ready [`PreparedRequest`].

mod body;
mod header;
mod method;
mod prepared;
mod query;
mod route;
mod upload;

pub use body::{JSON_CONTENT_TYPE, RequestBody};
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use prepared::PreparedRequest;
pub use query::QueryParams;
pub use route::RouteDescriptor;
pub use upload::FileUpload;
