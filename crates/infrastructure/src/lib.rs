//! KsApi Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading.

pub mod adapters;
pub mod config;
pub mod http;

pub use adapters::ReqwestTransport;
pub use config::{ClientConfigFile, ClientSettings, ConfigError, ConfigLoader, TransportConfig};
pub use http::{BodyBuildError, BuiltBody, build_body, upload_from_path};
