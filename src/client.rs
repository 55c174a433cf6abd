//! Mailtrap async client and its builder.

use crate::resources::{AccountResource, AccountsResource, SendingResource};
use crate::transport::{CredentialProvider, ReqwestTransport, StaticToken, Transport};
use crate::executor::{bearer_header, user_agent_header};
use crate::{CommandFactory, Error, Executor, ResourceUri, Result};
use reqwest::StatusCode;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Async client for the Mailtrap API.
///
/// Use [`Client::new`] with an API token for defaults or [`Client::builder`]
/// for custom settings like proxies, timeouts, and a custom transport.
#[derive(Debug, Clone)]
pub struct Client {
    executor: Executor,
    api_uri: ResourceUri,
    send_uri: ResourceUri,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client authenticated with `api_token`.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailtrap_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailtrap_client::Error> {
    /// let client = Client::new("my-api-token")?;
    /// for account in client.accounts().list().await? {
    ///     println!("{}: {}", account.id, account.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_token(api_token).build()
    }

    /// The executor running this client's commands.
    ///
    /// Use it with [`Client::factory`] to issue calls the resource wrappers
    /// don't cover, or to pass a cancellation token.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// The command factory. Stateless, so every call returns an equivalent one.
    pub fn factory(&self) -> CommandFactory {
        CommandFactory
    }

    /// Root of the general API, e.g. `https://mailtrap.io/api`.
    pub fn api_uri(&self) -> &ResourceUri {
        &self.api_uri
    }

    /// Accounts reachable with the token.
    pub fn accounts(&self) -> AccountsResource<'_> {
        AccountsResource::new(&self.executor, self.api_uri.append(["accounts"]))
    }

    /// One account.
    pub fn account(&self, account_id: i64) -> AccountResource<'_> {
        AccountResource::new(&self.executor, self.api_uri.append(["accounts"]).append([account_id]))
    }

    /// Transactional sending.
    pub fn sending(&self) -> SendingResource<'_> {
        SendingResource::new(&self.executor, self.send_uri.append(["api", "send"]))
    }
}

const BASE_URL: &str = "https://mailtrap.io";
const SEND_URL: &str = "https://send.api.mailtrap.io";
const API_TOKEN_VAR: &str = "MAILTRAP_API_TOKEN";
const BASE_URL_VAR: &str = "MAILTRAP_BASE_URL";

/// Builder for configuring a Mailtrap client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Clone)]
pub struct ClientBuilder {
    api_token: Option<String>,
    credentials: Option<Arc<dyn CredentialProvider>>,
    base_url: String,
    send_url: String,
    user_agent: String,
    proxy: Option<String>,
    timeout: Option<Duration>,
    danger_accept_invalid_certs: bool,
    gone_statuses: Vec<StatusCode>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - No API token (one must be set before [`ClientBuilder::build`])
    /// - `https://mailtrap.io` for the general API
    /// - `https://send.api.mailtrap.io` for sending
    /// - No proxy, no timeout, strict TLS validation
    /// - Only `410 Gone` reported as [`Error::ResourceDeleted`]
    pub fn new() -> Self {
        Self {
            api_token: None,
            credentials: None,
            base_url: BASE_URL.to_string(),
            send_url: SEND_URL.to_string(),
            user_agent: crate::executor::DEFAULT_USER_AGENT.to_string(),
            proxy: None,
            timeout: None,
            danger_accept_invalid_certs: false,
            gone_statuses: vec![StatusCode::GONE],
            transport: None,
        }
    }

    /// Start from `MAILTRAP_API_TOKEN` and, when set, `MAILTRAP_BASE_URL`.
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        if let Ok(token) = std::env::var(API_TOKEN_VAR) {
            builder = builder.api_token(token);
        }
        if let Ok(base_url) = std::env::var(BASE_URL_VAR) {
            builder = builder.base_url(base_url);
        }
        builder
    }

    /// Set the API token sent as a bearer credential.
    pub fn api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    /// Supply credentials from a custom provider instead of a fixed token.
    pub fn credentials(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(provider);
        self
    }

    /// Override the general API host.
    ///
    /// Useful for testing against a local server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the sending API host.
    pub fn send_url(mut self, send_url: impl Into<String>) -> Self {
        self.send_url = send_url.into();
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080" or "socks5://127.0.0.1:1080").
    ///
    /// Ignored when a custom transport is supplied.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Limit how long a single request may take.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    ///
    /// Ignored when a custom transport is supplied.
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Statuses reported as [`Error::ResourceDeleted`].
    pub fn gone_statuses(mut self, statuses: impl IntoIterator<Item = StatusCode>) -> Self {
        self.gone_statuses = statuses.into_iter().collect();
        self
    }

    /// Send requests through `transport` instead of the built-in reqwest client.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// No network request is made.
    ///
    /// # Examples
    /// ```
    /// # use mailtrap_client::Client;
    /// let client = Client::builder()
    ///     .api_token("my-api-token")
    ///     .user_agent("my-app/1.0")
    ///     .build()?;
    /// assert_eq!(client.api_uri().as_str(), "https://mailtrap.io/api");
    /// # Ok::<(), mailtrap_client::Error>(())
    /// ```
    pub fn build(self) -> Result<Client> {
        let credentials: Arc<dyn CredentialProvider> = match (self.credentials, self.api_token) {
            (Some(provider), _) => provider,
            (None, Some(token)) if !token.trim().is_empty() => {
                bearer_header(&token)?;
                Arc::new(StaticToken::new(token))
            }
            (None, _) => {
                return Err(Error::invalid_argument(
                    "api_token",
                    format!("must be set, e.g. through {API_TOKEN_VAR}"),
                ));
            }
        };

        user_agent_header(&self.user_agent)?;

        let api_uri = ResourceUri::parse(&self.base_url)?.append(["api"]);
        let send_uri = ResourceUri::parse(&self.send_url)?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                ReqwestTransport::with_options(
                    self.proxy.as_deref(),
                    self.timeout,
                    self.danger_accept_invalid_certs,
                )
                .map_err(|e| Error::invalid_argument("proxy", e.to_string()))?,
            ),
        };

        let executor = Executor::new(transport, credentials)
            .with_user_agent(self.user_agent)
            .with_gone_statuses(self.gone_statuses);

        Ok(Client {
            executor,
            api_uri,
            send_uri,
        })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("send_url", &self.send_url)
            .field("user_agent", &self.user_agent)
            .field("proxy", &self.proxy)
            .field("timeout", &self.timeout)
            .field("danger_accept_invalid_certs", &self.danger_accept_invalid_certs)
            .field("gone_statuses", &self.gone_statuses)
            .field("transport", &self.transport)
            .finish()
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_a_token() {
        let err = Client::builder().build().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { param: "api_token", .. }));

        let err = Client::new("   ").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { param: "api_token", .. }));
    }

    #[test]
    fn build_rejects_bad_base_url() {
        let err = Client::builder()
            .api_token("t")
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { param: "uri", .. }));
    }

    #[test]
    fn build_rejects_bad_proxy() {
        let err = Client::builder()
            .api_token("t")
            .proxy("http://[::1")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { param: "proxy", .. }));
    }

    #[test]
    fn resource_locations() {
        let client = Client::builder()
            .api_token("t")
            .base_url("http://127.0.0.1:8080/")
            .send_url("http://127.0.0.1:9090")
            .build()
            .unwrap();

        assert_eq!(client.api_uri().as_str(), "http://127.0.0.1:8080/api");
        assert_eq!(
            client.account(7).contacts().uri().as_str(),
            "http://127.0.0.1:8080/api/accounts/7/contacts"
        );
        assert_eq!(
            client.sending().uri().as_str(),
            "http://127.0.0.1:9090/api/send"
        );
    }

    #[test]
    fn credentials_provider_replaces_token() {
        #[derive(Debug)]
        struct Rotating;

        impl CredentialProvider for Rotating {
            fn bearer_token(&self) -> String {
                "rotated".to_string()
            }
        }

        assert!(Client::builder().credentials(Arc::new(Rotating)).build().is_ok());
    }

    #[test]
    fn build_rejects_header_breaking_values() {
        let err = Client::new("bad\ntoken").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { param: "api_token", .. }));

        let err = Client::builder()
            .api_token("t")
            .user_agent("agent\r\n")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { param: "user_agent", .. }));
    }

    #[test]
    fn factory_builds_commands_for_client_locations() {
        let client = Client::new("t").unwrap();
        let command = client
            .factory()
            .create_get_list::<crate::models::Account>(client.api_uri().append(["accounts"]));
        assert_eq!(command.uri(), client.accounts().uri());
    }

    #[test]
    fn debug_hides_token() {
        let builder = Client::builder().api_token("super-secret");
        let debug = format!("{builder:?}");
        assert!(!debug.contains("super-secret"), "{debug}");
    }
}
