//! Client identity
//!
//! A [`ClientIdentity`] is an immutable value. Logging in or out produces a
//! new identity, so requests already in flight keep the identity they were
//! issued under.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::request::Headers;

/// Header carrying the application id.
pub const APP_ID_HEADER: &str = "X-Kickstarter-App-Id";
/// Header carrying the preferred currency.
pub const CURRENCY_HEADER: &str = "X-Kickstarter-Currency";
/// Header carrying the client build version.
pub const BUILD_VERSION_HEADER: &str = "X-Kickstarter-Build-Version";
/// Accept value negotiating JSON responses.
pub const ACCEPT_JSON: &str = "application/json; charset=utf-8";

/// An OAuth access token.
///
/// `Debug` output is redacted so tokens never reach logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OauthToken(String);

impl OauthToken {
    /// Wraps a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OauthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OauthToken(***)")
    }
}

/// Who is calling: application tags plus the optional auth token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIdentity {
    /// Application bundle id
    pub app_id: String,
    /// Auth token, present when logged in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_token: Option<OauthToken>,
    /// Preferred language tag
    pub language: String,
    /// Preferred currency code
    pub currency: String,
    /// Client build version
    pub build_version: String,
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self {
            app_id: "com.kickstarter.kickstarter".to_string(),
            oauth_token: None,
            language: "en".to_string(),
            currency: "USD".to_string(),
            build_version: "1".to_string(),
        }
    }
}

impl ClientIdentity {
    /// Returns a copy of this identity carrying `token`.
    #[must_use]
    pub fn login(&self, token: OauthToken) -> Self {
        Self {
            oauth_token: Some(token),
            ..self.clone()
        }
    }

    /// Returns a copy of this identity without a token.
    #[must_use]
    pub fn logout(&self) -> Self {
        Self {
            oauth_token: None,
            ..self.clone()
        }
    }

    /// Returns true when requests will be authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.oauth_token.is_some()
    }

    /// Headers attached to every request issued under this identity.
    ///
    /// `Authorization` is present exactly when a token is.
    #[must_use]
    pub fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.set("Accept", ACCEPT_JSON);
        headers.set("Accept-Language", self.language.as_str());
        headers.set(APP_ID_HEADER, self.app_id.as_str());
        headers.set(CURRENCY_HEADER, self.currency.as_str());
        headers.set(BUILD_VERSION_HEADER, self.build_version.as_str());
        if let Some(token) = &self.oauth_token {
            headers.set("Authorization", format!("Bearer {}", token.expose()));
        }
        headers
    }
}
