//! Resource wrappers: one method per endpoint, each a single command.

use crate::models::{
    Account, AccountAccess, BillingUsage, Contact, ContactResponse, CreateContactRequest,
    DeletedAccess, SandboxMessage, SendEmailRequest, SendEmailResponse, UpdateContactRequest,
    UpdateContactResponse, UpdatePermissionsRequest, UpdatePermissionsResponse,
};
use crate::{CommandFactory, Executor, ResourceUri, Result};
use std::fmt;

macro_rules! resource {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name<'a> {
            executor: &'a Executor,
            uri: ResourceUri,
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(executor: &'a Executor, uri: ResourceUri) -> Self {
                Self { executor, uri }
            }

            /// Location of this resource.
            pub fn uri(&self) -> &ResourceUri {
                &self.uri
            }
        }
    };
}

resource!(
    /// `/api/accounts`
    AccountsResource
);

impl AccountsResource<'_> {
    /// Every account the token can reach.
    pub async fn list(&self) -> Result<Vec<Account>> {
        let command = CommandFactory.create_get_list(self.uri.clone());
        self.executor.execute(&command).await
    }
}

resource!(
    /// `/api/accounts/{account_id}`
    AccountResource
);

impl<'a> AccountResource<'a> {
    /// Users, invites, and tokens with access to the account.
    pub fn accesses(&self) -> AccountAccessesResource<'a> {
        AccountAccessesResource::new(self.executor, self.uri.append(["account_accesses"]))
    }

    /// Billing information.
    pub fn billing(&self) -> BillingResource<'a> {
        BillingResource::new(self.executor, self.uri.append(["billing"]))
    }

    /// Marketing contacts.
    pub fn contacts(&self) -> ContactsResource<'a> {
        ContactsResource::new(self.executor, self.uri.append(["contacts"]))
    }

    /// One sandbox inbox.
    pub fn inbox(&self, inbox_id: i64) -> InboxResource<'a> {
        InboxResource::new(self.executor, self.uri.append(["inboxes"]).append([inbox_id]))
    }
}

resource!(
    /// `/api/accounts/{account_id}/account_accesses`
    AccountAccessesResource
);

impl AccountAccessesResource<'_> {
    /// Every access to the account.
    pub async fn list(&self) -> Result<Vec<AccountAccess>> {
        let command = CommandFactory.create_get_list(self.uri.clone());
        self.executor.execute(&command).await
    }

    /// Remove an access.
    ///
    /// Fails with [`Error::ResourceDeleted`](crate::Error::ResourceDeleted)
    /// when the access is already gone.
    pub async fn delete(&self, access_id: i64) -> Result<DeletedAccess> {
        let command = CommandFactory.create_delete(self.uri.append([access_id]));
        self.executor.execute(&command).await
    }

    /// Grant, change, or revoke permissions of an access in one call.
    pub async fn update_permissions(
        &self,
        access_id: i64,
        request: UpdatePermissionsRequest,
    ) -> Result<UpdatePermissionsResponse> {
        let uri = self
            .uri
            .append([access_id])
            .append(["permissions", "bulk"]);
        let command = CommandFactory.create_put(uri, request);
        self.executor.execute(&command).await
    }
}

resource!(
    /// `/api/accounts/{account_id}/billing`
    BillingResource
);

impl BillingResource<'_> {
    /// Usage in the current billing cycle.
    pub async fn usage(&self) -> Result<BillingUsage> {
        let command = CommandFactory.create_get(self.uri.append(["usage"]));
        self.executor.execute(&command).await
    }
}

resource!(
    /// `/api/accounts/{account_id}/contacts`
    ContactsResource
);

impl ContactsResource<'_> {
    /// Create a contact.
    pub async fn create(&self, request: CreateContactRequest) -> Result<Contact> {
        let command = CommandFactory.create_post::<_, ContactResponse>(self.uri.clone(), request);
        Ok(self.executor.execute(&command).await?.data)
    }

    /// Fetch a contact by [`ContactId`](crate::ContactId) or email address.
    ///
    /// A blank, `.`, or `..` identifier fails with
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument) before any request.
    pub async fn get(&self, id_or_email: impl fmt::Display) -> Result<Contact> {
        let command = CommandFactory.create_get::<ContactResponse>(self.uri.append_id(id_or_email)?);
        Ok(self.executor.execute(&command).await?.data)
    }

    /// Update a contact by ID or email address.
    pub async fn update(
        &self,
        id_or_email: impl fmt::Display,
        request: UpdateContactRequest,
    ) -> Result<UpdateContactResponse> {
        let command = CommandFactory.create_patch(self.uri.append_id(id_or_email)?, request);
        self.executor.execute(&command).await
    }

    /// Delete a contact by ID or email address.
    pub async fn delete(&self, id_or_email: impl fmt::Display) -> Result<()> {
        let command = CommandFactory.create_delete(self.uri.append_id(id_or_email)?);
        self.executor.execute(&command).await
    }
}

resource!(
    /// `/api/accounts/{account_id}/inboxes/{inbox_id}`
    InboxResource
);

impl<'a> InboxResource<'a> {
    /// Messages captured by the inbox.
    pub fn messages(&self) -> MessagesResource<'a> {
        MessagesResource::new(self.executor, self.uri.append(["messages"]))
    }
}

resource!(
    /// `/api/accounts/{account_id}/inboxes/{inbox_id}/messages`
    MessagesResource
);

impl MessagesResource<'_> {
    /// The most recent messages.
    pub async fn list(&self) -> Result<Vec<SandboxMessage>> {
        let command = CommandFactory.create_get_list(self.uri.clone());
        self.executor.execute(&command).await
    }

    /// Messages whose subject or addresses match `term`.
    pub async fn search(&self, term: &str) -> Result<Vec<SandboxMessage>> {
        let command = CommandFactory.create_get_list(self.uri.append_query("search", term));
        self.executor.execute(&command).await
    }

    /// One message.
    pub async fn get(&self, message_id: i64) -> Result<SandboxMessage> {
        let command = CommandFactory.create_get(self.uri.append([message_id]));
        self.executor.execute(&command).await
    }
}

resource!(
    /// `/api/send` on the sending host
    SendingResource
);

impl SendingResource<'_> {
    /// Send a transactional email.
    pub async fn send(&self, request: SendEmailRequest) -> Result<SendEmailResponse> {
        let command = CommandFactory.create_post(self.uri.clone(), request);
        self.executor.execute(&command).await
    }
}
