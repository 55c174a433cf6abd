//! Typed descriptions of single API calls.

use crate::ResourceUri;
use std::fmt;
use std::marker::PhantomData;

/// HTTP verb of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Verb {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Verb> for reqwest::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => Self::GET,
            Verb::Post => Self::POST,
            Verb::Put => Self::PUT,
            Verb::Patch => Self::PATCH,
            Verb::Delete => Self::DELETE,
        }
    }
}

/// One API call: verb, target, optional body of type `Req`, response of type `Res`.
///
/// A command holds no I/O state. It can be executed any number of times and
/// every execution is independent.
pub struct Command<Req, Res> {
    verb: Verb,
    uri: ResourceUri,
    body: Option<Req>,
    response: PhantomData<fn() -> Res>,
}

impl<Req, Res> Command<Req, Res> {
    fn new(verb: Verb, uri: ResourceUri, body: Option<Req>) -> Self {
        Self {
            verb,
            uri,
            body,
            response: PhantomData,
        }
    }

    /// HTTP verb.
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// Target location.
    pub fn uri(&self) -> &ResourceUri {
        &self.uri
    }

    /// Request body, if the command sends one.
    pub fn body(&self) -> Option<&Req> {
        self.body.as_ref()
    }
}

impl<Req: Clone, Res> Clone for Command<Req, Res> {
    fn clone(&self) -> Self {
        Self::new(self.verb, self.uri.clone(), self.body.clone())
    }
}

impl<Req: fmt::Debug, Res> fmt::Debug for Command<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("verb", &self.verb)
            .field("uri", &self.uri.as_str())
            .field("body", &self.body)
            .field("response", &std::any::type_name::<Res>())
            .finish()
    }
}

/// Builds [`Command`]s. Stateless and freely shared.
///
/// ```
/// # use mailtrap_client::{CommandFactory, ResourceUri, Verb};
/// # use mailtrap_client::models::Account;
/// let uri = ResourceUri::parse("https://mailtrap.io/api/accounts")?;
/// let command = CommandFactory.create_get_list::<Account>(uri);
/// assert_eq!(command.verb(), Verb::Get);
/// # Ok::<(), mailtrap_client::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandFactory;

impl CommandFactory {
    /// `GET` a single resource.
    pub fn create_get<Res>(&self, uri: ResourceUri) -> Command<(), Res> {
        Command::new(Verb::Get, uri, None)
    }

    /// `GET` a collection.
    pub fn create_get_list<Res>(&self, uri: ResourceUri) -> Command<(), Vec<Res>> {
        Command::new(Verb::Get, uri, None)
    }

    /// `POST` a body.
    pub fn create_post<Req, Res>(&self, uri: ResourceUri, body: Req) -> Command<Req, Res> {
        Command::new(Verb::Post, uri, Some(body))
    }

    /// `PUT` a body.
    pub fn create_put<Req, Res>(&self, uri: ResourceUri, body: Req) -> Command<Req, Res> {
        Command::new(Verb::Put, uri, Some(body))
    }

    /// `PATCH` a body.
    pub fn create_patch<Req, Res>(&self, uri: ResourceUri, body: Req) -> Command<Req, Res> {
        Command::new(Verb::Patch, uri, Some(body))
    }

    /// `DELETE` a resource.
    pub fn create_delete<Res>(&self, uri: ResourceUri) -> Command<(), Res> {
        Command::new(Verb::Delete, uri, None)
    }
}
