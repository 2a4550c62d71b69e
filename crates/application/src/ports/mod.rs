//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the request pipeline and its
//! collaborators. The transport is implemented by adapters in the
//! infrastructure layer; decoders are supplied per call.

mod cancellation;
mod decoder;
mod transport;

pub use cancellation::{CancellationReceiver, CancellationToken, cancellation_pair};
pub use decoder::{DecodeError, Decoder, FnDecoder, JsonDecoder};
pub use transport::{RawOutcome, Transport, TransportError};
