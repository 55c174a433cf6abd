//! The narrow HTTP contract the executor depends on.

use crate::{ResourceUri, TransportError, Verb};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::fmt;
use std::time::Duration;

/// A fully prepared request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP verb.
    pub verb: Verb,
    /// Absolute target.
    pub uri: ResourceUri,
    /// Headers to send, credential included.
    pub headers: HeaderMap,
    /// Serialized JSON body.
    pub body: Option<Vec<u8>>,
}

/// What came back from the server.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw body.
    pub body: Bytes,
}

/// Sends one request and returns the raw response.
///
/// Any status code is a successful send; only failures to get a response at
/// all are errors.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send `request`.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Supplies the bearer credential attached to every request.
pub trait CredentialProvider: Send + Sync + fmt::Debug {
    /// The current bearer token.
    fn bearer_token(&self) -> String;
}

/// A fixed API token.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    /// Wrap `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> String {
        self.0.clone()
    }
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Wrap an existing client.
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Build a client with the given options.
    pub fn with_options(
        proxy: Option<&str>,
        timeout: Option<Duration>,
        danger_accept_invalid_certs: bool,
    ) -> Result<Self, reqwest::Error> {
        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(danger_accept_invalid_certs);

        if let Some(proxy_url) = proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::new(builder.build()?))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .http
            .request(request.verb.into(), request.uri.as_url().clone())
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
