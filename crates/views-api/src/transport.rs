//! HTTP transport seam.
//!
//! [`ViewsClient`](crate::ViewsClient) only ever issues `GET` requests and only
//! needs the status code, the cookies set by the server, and the body text.
//! [`HttpTransport`] captures exactly that, so tests can substitute an
//! in-memory transport and deployments can bring their own `reqwest::Client`.

use std::time::Duration;

use async_trait::async_trait;
use connect::Session;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, USER_AGENT};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// User agent sent by the default transport.
pub const DEFAULT_USER_AGENT: &str = concat!("connect-views/", env!("CARGO_PKG_VERSION"));

/// Response to a `GET` request, reduced to what the client consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Cookies set by the response (`Set-Cookie` name and value only).
    pub cookies: Session,
    /// Response body decoded as text.
    pub body: String,
}

/// The request could not be sent or its response could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Description of the failure.
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Issues `GET` requests on behalf of the views client.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs a `GET` of `uri`, sending `cookies` as the `Cookie` header
    /// when given and non-empty.
    ///
    /// Any HTTP status is a successful transport result; only failures to
    /// send the request or read the response are errors.
    async fn get(&self, uri: &Url, cookies: Option<&Session>) -> Result<HttpResponse, TransportError>;
}

// ---------------------------------------------------------------------------
// reqwest implementation
// ---------------------------------------------------------------------------

/// Settings for [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl TransportConfig {
    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// [`HttpTransport`] backed by a [`reqwest::Client`].
///
/// The client's own cookie store is never enabled; cookies travel only as
/// the explicit [`Session`] the views client passes in.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport with its own `reqwest` client.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut default_headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| TransportError::new(format!("invalid user agent: {e}")))?;
        default_headers.insert(USER_AGENT, user_agent);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| TransportError::new(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wraps an existing client, e.g. one configured with credentials or TLS
    /// roots by the embedding application.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, uri: &Url, cookies: Option<&Session>) -> Result<HttpResponse, TransportError> {
        let mut request = self.client.get(uri.clone());
        if let Some(header) = cookies.and_then(Session::cookie_header) {
            request = request.header(COOKIE, header);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let cookies: Session = response
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();
        let body = response.text().await?;

        debug!(uri = %uri, status, cookies = cookies.len(), "GET completed");
        Ok(HttpResponse {
            status,
            cookies,
            body,
        })
    }
}
