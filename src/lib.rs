//! # Mailtrap Client
//! Asynchronous client for the Mailtrap email API. Every call goes through one typed command pipeline: compose a [`ResourceUri`], build a [`Command`] with [`CommandFactory`], and run it on an [`Executor`], which validates the request body, sends it, and decodes the reply or maps the failure onto [`Error`].
//!
//! ## Audience and uses
//! For Rust services and tools that manage Mailtrap accounts, permissions, contacts, and sandbox inboxes, or send transactional mail. Start with [`Client`] for the common endpoints, or drop down to [`Client::executor`] and [`CommandFactory`] for anything the wrappers don't cover.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. The default transport uses `reqwest`. Any other HTTP stack can be plugged in by implementing [`Transport`].
//!
//! ## Out of scope
//! OAuth flows and token refresh: the client attaches whatever bearer token its [`CredentialProvider`] returns. There is no retry logic; a failed or cancelled call is reported once and retrying is up to the caller.
//!
//! ## Errors
//! Request bodies that break their rules fail with [`Error::Validation`] before anything is sent. Non-2xx replies become [`Error::Api`] (or [`Error::ResourceDeleted`] for gone resources) carrying the verb, URI, status, and parsed [`Problem`]. Network failures and cancellation are [`Error::Transport`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Logging
//! Requests, responses, and failures are reported through `tracing` at `debug` and `warn` levels. The credential is never logged. Install a subscriber to see them.
//!
//! ## Example
//! ```no_run
//! use mailtrap_client::Client;
//! use mailtrap_client::models::{EmailAddress, SendEmailRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailtrap_client::Error> {
//!     let client = Client::new("my-api-token")?;
//!
//!     for account in client.accounts().list().await? {
//!         println!("{}: {}", account.id, account.name);
//!     }
//!
//!     let request = SendEmailRequest::new(EmailAddress::new("hello@example.com"), "Welcome")
//!         .to(EmailAddress::new("jane@example.com"))
//!         .text("Glad to have you.");
//!     let sent = client.sending().send(request).await?;
//!     println!("Sent: {:?}", sent.message_ids);
//!     Ok(())
//! }
//! ```

mod client;
mod command;
mod error;
mod executor;
pub mod flag_or_object;
mod identifiers;
pub mod models;
mod problem;
pub mod resources;
pub mod string_enum;
mod transport;
mod uri;
pub mod validation;

pub use client::{Client, ClientBuilder};
pub use command::{Command, CommandFactory, Verb};
pub use error::{ApiError, BoxError, Error, TransportError};
pub use executor::{DEFAULT_USER_AGENT, Executor};
pub use identifiers::{ContactId, MessageId};
pub use problem::Problem;
pub use string_enum::StringEnum;
pub use transport::{
    CredentialProvider, HttpRequest, HttpResponse, ReqwestTransport, StaticToken, Transport,
};
pub use uri::ResourceUri;
pub use validation::{RuleSet, Validate, ValidationResult, ensure_valid};

pub use tokio_util::sync::CancellationToken;

/// Result type alias for Mailtrap operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
