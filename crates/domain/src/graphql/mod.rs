//! GraphQL domain types
//!
//! Query documents are built from a non-empty set of root fields and the
//! response is a `data` envelope with an optional error list.

mod envelope;
mod query;

pub use envelope::{GraphQlErrorMessage, GraphResponse};
pub use query::{QueryArgument, QueryField, QuerySet};
