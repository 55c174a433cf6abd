//! Runs [`Command`]s: validate, serialize, dispatch, interpret.

use crate::transport::{CredentialProvider, HttpRequest, HttpResponse, Transport};
use crate::validation::{Validate, ensure_valid};
use crate::{ApiError, Command, Error, Problem, ResourceUri, Result, TransportError, Verb};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("mailtrap-client-rs/", env!("CARGO_PKG_VERSION"));

/// Executes commands against a [`Transport`].
///
/// Holds only immutable configuration, so one executor serves any number of
/// concurrent executions.
#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialProvider>,
    user_agent: String,
    gone_statuses: Vec<StatusCode>,
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("transport", &self.transport)
            .field("credentials", &self.credentials)
            .field("user_agent", &self.user_agent)
            .field("gone_statuses", &self.gone_statuses)
            .finish()
    }
}

impl Executor {
    /// Create an executor with the default user agent.
    ///
    /// Only `410 Gone` is reported as [`Error::ResourceDeleted`].
    pub fn new(transport: Arc<dyn Transport>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            transport,
            credentials,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            gone_statuses: vec![StatusCode::GONE],
        }
    }

    /// Override the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Statuses reported as [`Error::ResourceDeleted`] instead of [`Error::Api`].
    pub fn with_gone_statuses(mut self, statuses: impl IntoIterator<Item = StatusCode>) -> Self {
        self.gone_statuses = statuses.into_iter().collect();
        self
    }

    /// Execute `command` to completion.
    pub async fn execute<Req, Res>(&self, command: &Command<Req, Res>) -> Result<Res>
    where
        Req: Serialize + Validate,
        Res: DeserializeOwned,
    {
        self.execute_with_cancel(command, &CancellationToken::new())
            .await
    }

    /// Execute `command`, aborting the in-flight request when `cancel` fires.
    ///
    /// A body that fails validation is rejected before anything is sent.
    /// Cancellation surfaces as [`TransportError::Cancelled`].
    pub async fn execute_with_cancel<Req, Res>(
        &self,
        command: &Command<Req, Res>,
        cancel: &CancellationToken,
    ) -> Result<Res>
    where
        Req: Serialize + Validate,
        Res: DeserializeOwned,
    {
        let verb = command.verb();
        let uri = command.uri();

        let body = match command.body() {
            Some(body) => Some(self.encode(verb, uri, body)?),
            None => None,
        };

        let request = HttpRequest {
            verb,
            uri: uri.clone(),
            headers: self.headers(body.is_some())?,
            body,
        };

        debug!(%verb, %uri, "dispatching request");
        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(%verb, %uri, "request cancelled");
                Err(TransportError::Cancelled)
            }
            result = self.transport.send(request) => result,
        };

        match response {
            Ok(response) => self.interpret(verb, uri, response),
            Err(source) => {
                if !matches!(source, TransportError::Cancelled) {
                    warn!(%verb, %uri, error = %source, "request did not complete");
                }
                Err(Error::Transport {
                    verb,
                    uri: uri.clone(),
                    source,
                })
            }
        }
    }

    fn encode<Req>(&self, verb: Verb, uri: &ResourceUri, body: &Req) -> Result<Vec<u8>>
    where
        Req: Serialize + Validate,
    {
        ensure_valid(body.validate(), "body").inspect_err(|err| {
            debug!(%verb, %uri, error = %err, "request body rejected");
        })?;

        serde_json::to_vec(body).map_err(|source| Error::Serialization {
            verb,
            uri: uri.clone(),
            source,
        })
    }

    fn interpret<Res>(&self, verb: Verb, uri: &ResourceUri, response: HttpResponse) -> Result<Res>
    where
        Res: DeserializeOwned,
    {
        let status = response.status;
        debug!(%verb, %uri, status = status.as_u16(), "received response");

        if status.is_success() {
            if response.body.iter().all(u8::is_ascii_whitespace) {
                // `()` and `Option<T>` accept a missing body, everything else needs one.
                return serde_json::from_slice(b"null").map_err(|_| Error::EmptyResponse {
                    verb,
                    uri: uri.clone(),
                });
            }
            return serde_json::from_slice(&response.body).map_err(|source| {
                Error::Deserialization {
                    verb,
                    uri: uri.clone(),
                    source,
                }
            });
        }

        let error = Box::new(ApiError {
            verb,
            uri: uri.clone(),
            status,
            problem: serde_json::from_slice::<Problem>(&response.body).ok(),
            body: String::from_utf8_lossy(&response.body).into_owned(),
        });
        warn!(
            %verb,
            %uri,
            status = status.as_u16(),
            message = %error.message(),
            "request failed"
        );

        if self.gone_statuses.contains(&status) {
            Err(Error::ResourceDeleted(error))
        } else {
            Err(Error::Api(error))
        }
    }

    fn headers(&self, has_body: bool) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer_header(&self.credentials.bearer_token())?);
        headers.insert(USER_AGENT, user_agent_header(&self.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }
}

/// `Authorization` value for `token`, marked sensitive.
pub(crate) fn bearer_header(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
        Error::invalid_argument("api_token", "contains characters not allowed in a header")
    })?;
    value.set_sensitive(true);
    Ok(value)
}

pub(crate) fn user_agent_header(user_agent: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(user_agent).map_err(|_| {
        Error::invalid_argument("user_agent", "contains characters not allowed in a header")
    })
}
