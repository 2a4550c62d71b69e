//! Server configuration
//!
//! A [`ServerConfig`] is an immutable snapshot of the endpoints a client
//! talks to. Switching environments replaces the snapshot wholesale.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// The backend environment a configuration points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentType {
    /// Live production backend
    #[default]
    Production,
    /// Shared staging backend
    Staging,
    /// Developer machine
    Local,
    /// Explicit URLs supplied by the caller
    Custom,
}

impl EnvironmentType {
    /// Returns the environment name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Local => "local",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for EnvironmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "local" => Ok(Self::Local),
            "custom" => Ok(Self::Custom),
            other => Err(DomainError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// REST and GraphQL endpoints for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    api_base_url: Url,
    graphql_endpoint_url: Url,
    environment: EnvironmentType,
}

impl ServerConfig {
    /// Production endpoints.
    #[must_use]
    pub fn production() -> Self {
        preset(
            EnvironmentType::Production,
            "https://api.kickstarter.com",
            "https://www.kickstarter.com/graph",
        )
    }

    /// Staging endpoints.
    #[must_use]
    pub fn staging() -> Self {
        preset(
            EnvironmentType::Staging,
            "https://api-staging.kickstarter.com",
            "https://staging.kickstarter.com/graph",
        )
    }

    /// Local development endpoints.
    #[must_use]
    pub fn local() -> Self {
        preset(
            EnvironmentType::Local,
            "http://api.ksr.test",
            "http://ksr.test/graph",
        )
    }

    /// Caller-supplied endpoints.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if either URL does not parse as
    /// an absolute URL.
    pub fn custom(api_base_url: &str, graphql_endpoint_url: &str) -> DomainResult<Self> {
        Ok(Self {
            api_base_url: parse_absolute(api_base_url)?,
            graphql_endpoint_url: parse_absolute(graphql_endpoint_url)?,
            environment: EnvironmentType::Custom,
        })
    }

    /// Returns the preset for a named environment.
    ///
    /// # Errors
    ///
    /// `Custom` has no preset; it needs explicit URLs via [`Self::custom`].
    pub fn preset(environment: EnvironmentType) -> DomainResult<Self> {
        match environment {
            EnvironmentType::Production => Ok(Self::production()),
            EnvironmentType::Staging => Ok(Self::staging()),
            EnvironmentType::Local => Ok(Self::local()),
            EnvironmentType::Custom => Err(DomainError::UnknownEnvironment(
                "custom environments need explicit URLs".to_string(),
            )),
        }
    }

    /// Base URL for REST routes.
    #[must_use]
    pub const fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    /// GraphQL endpoint URL.
    #[must_use]
    pub const fn graphql_endpoint_url(&self) -> &Url {
        &self.graphql_endpoint_url
    }

    /// The environment this configuration targets.
    #[must_use]
    pub const fn environment(&self) -> EnvironmentType {
        self.environment
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::production()
    }
}

#[allow(clippy::expect_used)]
fn preset(environment: EnvironmentType, api: &str, graphql: &str) -> ServerConfig {
    ServerConfig {
        api_base_url: Url::parse(api).expect("preset API URL is valid"),
        graphql_endpoint_url: Url::parse(graphql).expect("preset GraphQL URL is valid"),
        environment,
    }
}

fn parse_absolute(raw: &str) -> DomainResult<Url> {
    let url = Url::parse(raw).map_err(|e| DomainError::InvalidUrl(format!("{e}: {raw}")))?;
    if url.cannot_be_a_base() {
        return Err(DomainError::InvalidUrl(format!("not a base URL: {raw}")));
    }
    Ok(url)
}
