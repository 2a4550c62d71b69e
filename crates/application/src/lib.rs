//! KsApi Application - Ports and the request pipeline
//!
//! This crate defines:
//! - Port traits (transport, decoders, cancellation)
//! - The pipeline stages: request builder, response classifier, decoder
//!   adapter, pagination and GraphQL handling
//! - [`ApiClient`], which drives a request through the stages
//! - The REST and GraphQL error taxonomies

pub mod client;
pub mod error;
pub mod operation;
pub mod pipeline;
pub mod ports;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use error::{ApiError, ApiErrorKind, ApiResult, GraphError, GraphErrorKind, GraphResult};
pub use operation::{OperationHandle, run_cancellable};
pub use pipeline::{ClassifiedBody, RequestBuilder};
pub use ports::{
    CancellationReceiver, CancellationToken, DecodeError, Decoder, FnDecoder, JsonDecoder,
    RawOutcome, Transport, TransportError, cancellation_pair,
};
