//! Domain error types

use thiserror::Error;

/// Validation failures raised while building domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The environment name is not one of the known presets.
    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),

    /// A GraphQL query document was built from no root fields.
    #[error("a query set needs at least one root field")]
    EmptyQuerySet,
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
