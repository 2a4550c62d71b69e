//! Transport implementation using reqwest.
//!
//! This adapter implements the `Transport` port using the reqwest library.
//! One `reqwest::Client` is shared by every request so connections are
//! pooled and reused.

use std::time::Duration;

use async_trait::async_trait;
use ksapi_application::ports::{RawOutcome, Transport, TransportError};
use ksapi_domain::{Header, Headers, HttpMethod, PreparedRequest};
use reqwest::{Client, Method};

use crate::config::TransportConfig;
use crate::http::{BuiltBody, build_body};

const MAX_REDIRECTS: usize = 10;

/// Transport implementation using reqwest.
///
/// Cloning is cheap and clones share the connection pool. Dropping an
/// in-flight `execute` future aborts the request and frees its connection.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout_ms: u64,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(&TransportConfig::default())
    }

    /// Creates a transport from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_config(config: &TransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self::with_client(client, config.timeout))
    }

    /// Creates a transport around a custom reqwest client.
    ///
    /// `timeout` is only used to report timeouts.
    #[must_use]
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error_chain(error);
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return TransportError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lowered.contains("refused") {
                return TransportError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return TransportError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return TransportError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_builder() {
            return TransportError::InvalidRequest(error_chain(error));
        }

        TransportError::Other(error_chain(error))
    }
}

/// Joins an error and its sources into one message.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: PreparedRequest) -> RawOutcome {
        let PreparedRequest {
            id,
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(Self::to_reqwest_method(method), url);

        for header in headers.iter() {
            builder = builder.header(&header.name, &header.value);
        }

        let body = match build_body(body) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(request_id = %id, error = %e, "could not build request body");
                return RawOutcome::failed(TransportError::InvalidRequest(e.to_string()));
            }
        };
        if let Some(content_type) = body.content_type()
            && !headers.contains("content-type")
        {
            builder = builder.header("Content-Type", content_type);
        }
        builder = match body {
            BuiltBody::None => builder,
            BuiltBody::Json { content, .. } => builder.body(content),
            BuiltBody::Multipart(form) => builder.multipart(form),
        };

        let mut response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return RawOutcome::failed(Self::map_error(&e, self.timeout_ms)),
        };

        let status = response.status().as_u16();
        let response_headers: Headers = response
            .headers()
            .iter()
            .map(|(k, v)| Header::new(k.as_str(), v.to_str().unwrap_or("<binary>")))
            .collect();

        let mut body = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => body.extend_from_slice(&chunk),
                Ok(None) => return RawOutcome::response(status, response_headers, Some(body)),
                Err(e) => {
                    let error = if e.is_timeout() {
                        TransportError::Timeout {
                            timeout_ms: self.timeout_ms,
                        }
                    } else {
                        TransportError::BodyRead(error_chain(&e))
                    };
                    tracing::warn!(
                        request_id = %id,
                        status,
                        read = body.len(),
                        error = %error,
                        "response body cut short"
                    );
                    let partial = (!body.is_empty()).then_some(body);
                    return RawOutcome::response(status, response_headers, partial).with_error(error);
                }
            }
        }
    }
}
