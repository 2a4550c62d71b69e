//! The request/response pipeline.
//!
//! Each stage is a synchronous transformation; the only suspension point is
//! the transport call driven by [`crate::ApiClient`].

mod classifier;
mod decode;
mod graphql;
mod request_builder;

pub use classifier::{ClassifiedBody, classify};
pub use decode::{decode_optional, decode_sequence, decode_single};
pub use graphql::handle_graph_outcome;
pub use request_builder::RequestBuilder;
