//! Client configuration
//!
//! Settings come from an optional YAML file and from `KSAPI_*` environment
//! variables; variables override file values.

mod loader;
mod transport;

pub use loader::{
    ClientConfigFile, ClientSettings, ConfigError, ConfigLoader, ENV_API_BASE_URL, ENV_APP_ID,
    ENV_BUILD_VERSION, ENV_CURRENCY, ENV_ENVIRONMENT, ENV_GRAPHQL_URL, ENV_LANGUAGE,
    ENV_OAUTH_TOKEN, ENV_PREFIX, ENV_TIMEOUT_MS,
};
pub use transport::TransportConfig;
