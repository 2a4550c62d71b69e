//! Configuration loading from YAML files and environment variables.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ksapi_domain::{ClientIdentity, DomainError, EnvironmentType, OauthToken, ServerConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TransportConfig;

/// Prefix shared by every recognised environment variable.
pub const ENV_PREFIX: &str = "KSAPI_";
/// Environment name: production, staging, local or custom.
pub const ENV_ENVIRONMENT: &str = "KSAPI_ENVIRONMENT";
/// REST base URL for a custom environment.
pub const ENV_API_BASE_URL: &str = "KSAPI_API_BASE_URL";
/// GraphQL endpoint URL for a custom environment.
pub const ENV_GRAPHQL_URL: &str = "KSAPI_GRAPHQL_URL";
/// Application id header value.
pub const ENV_APP_ID: &str = "KSAPI_APP_ID";
/// `Accept-Language` value.
pub const ENV_LANGUAGE: &str = "KSAPI_LANGUAGE";
/// Currency header value.
pub const ENV_CURRENCY: &str = "KSAPI_CURRENCY";
/// Build version header value.
pub const ENV_BUILD_VERSION: &str = "KSAPI_BUILD_VERSION";
/// OAuth token to start signed in.
pub const ENV_OAUTH_TOKEN: &str = "KSAPI_OAUTH_TOKEN";
/// Request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "KSAPI_TIMEOUT_MS";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read {path}: {message}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying I/O message
        message: String,
    },

    /// The configuration file is not valid YAML of the expected shape.
    #[error("could not parse {path}: {message}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A numeric setting is not a number.
    #[error("invalid value for {key}: {value:?}")]
    InvalidNumber {
        /// Setting name
        key: &'static str,
        /// Offending value
        value: String,
    },

    /// A custom environment is missing one of its URLs.
    #[error("environment 'custom' requires {0}")]
    MissingUrl(&'static str),

    /// URLs were given for a preset environment.
    #[error("api_base_url and graphql_url are only allowed with environment 'custom', got '{0}'")]
    UrlsWithPreset(EnvironmentType),

    /// An environment name or URL was rejected.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// The on-disk configuration shape. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfigFile {
    /// Environment name
    pub environment: Option<String>,
    /// REST base URL (custom environments only)
    pub api_base_url: Option<String>,
    /// GraphQL endpoint URL (custom environments only)
    pub graphql_url: Option<String>,
    /// Application id
    pub app_id: Option<String>,
    /// Preferred language
    pub language: Option<String>,
    /// Preferred currency
    pub currency: Option<String>,
    /// Client build version
    pub build_version: Option<String>,
    /// OAuth token
    pub oauth_token: Option<String>,
    /// Request timeout in milliseconds
    pub timeout_ms: Option<u64>,
}

impl ClientConfigFile {
    /// Overlays every field set in `other` onto `self`.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            environment: other.environment.or(self.environment),
            api_base_url: other.api_base_url.or(self.api_base_url),
            graphql_url: other.graphql_url.or(self.graphql_url),
            app_id: other.app_id.or(self.app_id),
            language: other.language.or(self.language),
            currency: other.currency.or(self.currency),
            build_version: other.build_version.or(self.build_version),
            oauth_token: other.oauth_token.or(self.oauth_token),
            timeout_ms: other.timeout_ms.or(self.timeout_ms),
        }
    }

    /// Resolves the file into usable settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown environments, incomplete custom
    /// environments, URLs given alongside a preset, and invalid URLs.
    pub fn resolve(self) -> Result<ClientSettings, ConfigError> {
        let has_urls = self.api_base_url.is_some() || self.graphql_url.is_some();
        let environment = match self.environment.as_deref() {
            Some(name) => name.parse::<EnvironmentType>()?,
            None if has_urls => EnvironmentType::Custom,
            None => EnvironmentType::Production,
        };

        let server = if environment == EnvironmentType::Custom {
            let api = self
                .api_base_url
                .as_deref()
                .ok_or(ConfigError::MissingUrl("api_base_url"))?;
            let graph = self
                .graphql_url
                .as_deref()
                .ok_or(ConfigError::MissingUrl("graphql_url"))?;
            ServerConfig::custom(api, graph)?
        } else if has_urls {
            return Err(ConfigError::UrlsWithPreset(environment));
        } else {
            ServerConfig::preset(environment)?
        };

        let defaults = ClientIdentity::default();
        let mut identity = ClientIdentity {
            app_id: self.app_id.unwrap_or(defaults.app_id),
            oauth_token: None,
            language: self.language.unwrap_or(defaults.language),
            currency: self.currency.unwrap_or(defaults.currency),
            build_version: self.build_version.unwrap_or(defaults.build_version),
        };
        if let Some(token) = self.oauth_token.filter(|t| !t.is_empty()) {
            identity = identity.login(OauthToken::new(token));
        }

        let mut transport = TransportConfig::default();
        if let Some(timeout_ms) = self.timeout_ms {
            transport = transport.with_timeout(Duration::from_millis(timeout_ms));
        }

        Ok(ClientSettings {
            server,
            identity,
            transport,
        })
    }
}

/// Fully resolved client settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    /// Server configuration
    pub server: ServerConfig,
    /// Client identity
    pub identity: ClientIdentity,
    /// Transport settings
    pub transport: TransportConfig,
}

/// Loads [`ClientSettings`] from a YAML file and `KSAPI_*` variables.
///
/// # Example
///
/// ```ignore
/// let settings = ConfigLoader::new()
///     .with_file("ksapi.yaml")
///     .with_process_env()
///     .load()
///     .await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    vars: HashMap<String, String>,
}

impl ConfigLoader {
    /// Creates a loader with no sources; it resolves to the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads settings from a YAML file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Adds the `KSAPI_*` variables of the current process.
    #[must_use]
    pub fn with_process_env(self) -> Self {
        self.with_vars(std::env::vars())
    }

    /// Adds variables from any source; names without the prefix are ignored.
    #[must_use]
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.extend(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(k, _)| k.starts_with(ENV_PREFIX)),
        );
        self
    }

    /// Loads and resolves the settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed, a
    /// variable is malformed, or the merged settings do not resolve.
    pub async fn load(&self) -> Result<ClientSettings, ConfigError> {
        let from_file = match &self.file {
            Some(path) => read_file(path).await?,
            None => ClientConfigFile::default(),
        };
        let merged = from_file.merge(self.env_overrides()?);
        tracing::debug!(
            environment = merged.environment.as_deref().unwrap_or("production"),
            file = ?self.file,
            "configuration loaded"
        );
        merged.resolve()
    }

    fn env_overrides(&self) -> Result<ClientConfigFile, ConfigError> {
        let var = |key: &str| self.vars.get(key).filter(|v| !v.is_empty()).cloned();

        let timeout_ms = var(ENV_TIMEOUT_MS)
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                    key: ENV_TIMEOUT_MS,
                    value: raw.clone(),
                })
            })
            .transpose()?;

        Ok(ClientConfigFile {
            environment: var(ENV_ENVIRONMENT),
            api_base_url: var(ENV_API_BASE_URL),
            graphql_url: var(ENV_GRAPHQL_URL),
            app_id: var(ENV_APP_ID),
            language: var(ENV_LANGUAGE),
            currency: var(ENV_CURRENCY),
            build_version: var(ENV_BUILD_VERSION),
            oauth_token: var(ENV_OAUTH_TOKEN),
            timeout_ms,
        })
    }
}

async fn read_file(path: &Path) -> Result<ClientConfigFile, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if content.trim().is_empty() {
        return Ok(ClientConfigFile::default());
    }

    serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_yaml(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("ksapi.yaml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_defaults_without_sources() {
        let settings = ConfigLoader::new().load().await.unwrap();

        assert_eq!(settings.server, ServerConfig::production());
        assert_eq!(settings.identity, ClientIdentity::default());
        assert_eq!(settings.transport, TransportConfig::default());
    }

    #[tokio::test]
    async fn test_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(
            &dir,
            "environment: staging\nlanguage: de\ncurrency: EUR\ntimeout_ms: 5000\n",
        );

        let settings = ConfigLoader::new().with_file(&path).load().await.unwrap();

        assert_eq!(settings.server.environment(), EnvironmentType::Staging);
        assert_eq!(settings.identity.language, "de");
        assert_eq!(settings.identity.currency, "EUR");
        assert_eq!(settings.transport.timeout, Duration::from_millis(5000));
    }

    #[tokio::test]
    async fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(&dir, "environment: staging\nlanguage: de\n");

        let settings = ConfigLoader::new()
            .with_file(&path)
            .with_vars([
                (ENV_LANGUAGE, "fr"),
                (ENV_OAUTH_TOKEN, "tok"),
                ("HOME", "/root"),
            ])
            .load()
            .await
            .unwrap();

        assert_eq!(settings.server.environment(), EnvironmentType::Staging);
        assert_eq!(settings.identity.language, "fr");
        assert!(settings.identity.is_authenticated());
    }

    #[tokio::test]
    async fn test_custom_environment_from_vars() {
        let settings = ConfigLoader::new()
            .with_vars([
                (ENV_API_BASE_URL, "http://localhost:3000"),
                (ENV_GRAPHQL_URL, "http://localhost:3000/graph"),
            ])
            .load()
            .await
            .unwrap();

        assert_eq!(settings.server.environment(), EnvironmentType::Custom);
        assert_eq!(
            settings.server.api_base_url().as_str(),
            "http://localhost:3000/"
        );
    }

    #[tokio::test]
    async fn test_custom_environment_requires_both_urls() {
        let result = ConfigLoader::new()
            .with_vars([
                (ENV_ENVIRONMENT, "custom"),
                (ENV_API_BASE_URL, "http://localhost:3000"),
            ])
            .load()
            .await;

        assert!(matches!(result, Err(ConfigError::MissingUrl("graphql_url"))));
    }

    #[tokio::test]
    async fn test_urls_with_preset_are_rejected() {
        let result = ConfigLoader::new()
            .with_vars([
                (ENV_ENVIRONMENT, "production"),
                (ENV_API_BASE_URL, "http://localhost:3000"),
            ])
            .load()
            .await;

        assert!(matches!(
            result,
            Err(ConfigError::UrlsWithPreset(EnvironmentType::Production))
        ));
    }

    #[tokio::test]
    async fn test_unknown_environment() {
        let result = ConfigLoader::new()
            .with_vars([(ENV_ENVIRONMENT, "moon")])
            .load()
            .await;

        assert!(matches!(
            result,
            Err(ConfigError::Domain(DomainError::UnknownEnvironment(_)))
        ));
    }

    #[tokio::test]
    async fn test_invalid_timeout() {
        let result = ConfigLoader::new()
            .with_vars([(ENV_TIMEOUT_MS, "soon")])
            .load()
            .await;

        assert!(matches!(
            result,
            Err(ConfigError::InvalidNumber {
                key: ENV_TIMEOUT_MS,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_unknown_yaml_key_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(&dir, "enviroment: staging\n");

        let result = ConfigLoader::new().with_file(&path).load().await;

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigLoader::new()
            .with_file(dir.path().join("absent.yaml"))
            .load()
            .await;

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
