//! Error taxonomy for Mailtrap API operations.

use crate::{Problem, ResourceUri, Verb};
use reqwest::StatusCode;
use std::fmt;

/// Boxed error used for opaque transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while building, validating, or executing a command.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A pipeline entry point received an unusable argument.
    #[error("invalid argument `{param}`: {message}")]
    InvalidArgument {
        /// Name of the offending parameter.
        param: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// A request object failed its declared rules. No request was sent.
    #[error("validation failed for `{param}`: {}", errors.join("; "))]
    Validation {
        /// Name of the parameter that carried the request object.
        param: &'static str,
        /// Every rule violation, in rule order.
        errors: Vec<String>,
    },

    /// The request never produced a server response.
    #[error("{verb} {uri}: {source}")]
    Transport {
        /// Verb of the failed request.
        verb: Verb,
        /// Target of the failed request.
        uri: ResourceUri,
        /// What went wrong on the wire.
        #[source]
        source: TransportError,
    },

    /// The server answered with a non-success status.
    #[error("{0}")]
    Api(Box<ApiError>),

    /// The server reports that the addressed resource no longer exists.
    #[error("resource deleted: {0}")]
    ResourceDeleted(Box<ApiError>),

    /// A success response carried no body although one was required.
    #[error("{verb} {uri} returned an empty response body")]
    EmptyResponse {
        /// Verb of the request.
        verb: Verb,
        /// Target of the request.
        uri: ResourceUri,
    },

    /// The request body could not be encoded.
    #[error("failed to serialize request body for {verb} {uri}: {source}")]
    Serialization {
        /// Verb of the request.
        verb: Verb,
        /// Target of the request.
        uri: ResourceUri,
        /// Underlying encoder error.
        #[source]
        source: serde_json::Error,
    },

    /// A response body did not match the expected shape.
    #[error("failed to deserialize response of {verb} {uri}: {source}")]
    Deserialization {
        /// Verb of the request.
        verb: Verb,
        /// Target of the request.
        uri: ResourceUri,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn invalid_argument(param: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param,
            message: message.into(),
        }
    }

    /// The server failure details, for both [`Error::Api`] and [`Error::ResourceDeleted`].
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) | Self::ResourceDeleted(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status returned by the server, if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        self.api_error().map(|err| err.status)
    }

    /// `true` when the execution was aborted by its cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                source: TransportError::Cancelled,
                ..
            }
        )
    }

    /// `true` when the server reports that the addressed resource is gone.
    pub fn is_resource_deleted(&self) -> bool {
        matches!(self, Self::ResourceDeleted(_))
    }
}

/// Failure reported by a [`Transport`](crate::Transport) before any response arrived.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connect(#[source] BoxError),

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// The caller cancelled the execution.
    #[error("request cancelled")]
    Cancelled,

    /// Any other I/O failure.
    #[error("transport failure: {0}")]
    Other(#[source] BoxError),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(Box::new(err))
        } else {
            Self::Other(Box::new(err))
        }
    }
}

/// Context of a non-success server response.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Verb of the failed request.
    pub verb: Verb,
    /// Target of the failed request.
    pub uri: ResourceUri,
    /// Status code returned by the server.
    pub status: StatusCode,
    /// Parsed failure body, when it had the expected shape.
    pub problem: Option<Problem>,
    /// Raw failure body as text.
    pub body: String,
}

impl ApiError {
    /// Human-readable failure message.
    ///
    /// Prefers the parsed problem, then the raw body, then the status reason.
    pub fn message(&self) -> String {
        self.problem
            .as_ref()
            .and_then(Problem::message)
            .or_else(|| {
                let body = self.body.trim();
                (!body.is_empty()).then(|| body.to_string())
            })
            .unwrap_or_else(|| {
                self.status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} failed with status {}: {}",
            self.verb,
            self.uri,
            self.status.as_u16(),
            self.message()
        )
    }
}
