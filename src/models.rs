//! Request and response records for the Mailtrap API.

use crate::string_enum::string_enum;
use crate::validation::{RuleSet, Validate};
use crate::{ContactId, MessageId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;

macro_rules! validated_by {
    ($ty:ty, $rules:ident) => {
        impl Validate for $ty {
            fn collect_errors(&self, path: &str, errors: &mut Vec<String>) {
                $rules.check(self, path, errors);
            }
        }
    };
}

string_enum! {
    /// Access level granted on a resource.
    pub struct AccessLevel {
        /// Account owner. Reported, never assignable.
        OWNER = "owner",
        /// Full access.
        ADMIN = "admin",
        /// Read-only access.
        VIEWER = "viewer",
        /// Mixed access across child resources. Reported, never assignable.
        INDETERMINATE = "indeterminate",
    }
}

string_enum! {
    /// Kind of resource a permission applies to.
    pub struct ResourceType {
        /// The whole account.
        ACCOUNT = "account",
        /// Billing settings.
        BILLING = "billing",
        /// Sandbox project.
        PROJECT = "project",
        /// Sandbox inbox.
        INBOX = "inbox",
        /// Sending domain.
        SENDING_DOMAIN = "sending_domain",
        /// Email campaigns.
        EMAIL_CAMPAIGN_PERMISSION_SCOPE = "email_campaign_permission_scope",
    }
}

string_enum! {
    /// Who an account access belongs to.
    pub struct SpecifierType {
        /// A registered user.
        USER = "User",
        /// A pending invite.
        INVITE = "Invite",
        /// An API token.
        API_TOKEN = "ApiToken",
    }
}

string_enum! {
    /// Subscription state of a contact.
    pub struct ContactStatus {
        /// Receives campaigns.
        SUBSCRIBED = "subscribed",
        /// Opted out.
        UNSUBSCRIBED = "unsubscribed",
    }
}

string_enum! {
    /// What an upsert did.
    pub struct ContactAction {
        /// A new contact was created.
        CREATED = "created",
        /// An existing contact was updated.
        UPDATED = "updated",
    }
}

const ASSIGNABLE_ACCESS_LEVELS: &[AccessLevel] = &[AccessLevel::ADMIN, AccessLevel::VIEWER];

const ASSIGNABLE_RESOURCE_TYPES: &[ResourceType] = &[
    ResourceType::ACCOUNT,
    ResourceType::BILLING,
    ResourceType::PROJECT,
    ResourceType::INBOX,
    ResourceType::SENDING_DOMAIN,
];

/// An account the token can access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Numeric access levels the token holds.
    #[serde(default)]
    pub access_levels: Vec<i64>,
}

/// A user, invite, or token with access to an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountAccess {
    /// Access ID.
    pub id: i64,
    /// Kind of holder.
    pub specifier_type: SpecifierType,
    /// The holder.
    pub specifier: Specifier,
    /// Resources the holder can reach.
    #[serde(default)]
    pub resources: Vec<AccessResource>,
    /// What the caller may do with this access.
    pub permissions: AccessPermissions,
}

/// Holder of an account access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specifier {
    /// Holder ID.
    pub id: i64,
    /// Email, for users and invites.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Name, for users and tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One resource reachable through an access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessResource {
    /// Resource ID.
    pub resource_id: i64,
    /// Resource kind.
    pub resource_type: ResourceType,
    /// Granted level.
    pub access_level: AccessLevel,
}

/// Caller capabilities on an access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPermissions {
    pub can_read: bool,
    pub can_update: bool,
    pub can_destroy: bool,
    pub can_leave: bool,
}

/// Reply to an access removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedAccess {
    /// ID of the removed access.
    pub id: i64,
}

/// Bulk permission change for one account access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePermissionsRequest {
    /// Changes to apply, in order.
    pub permissions: Vec<PermissionChange>,
}

/// Grant, change, or revoke access to one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionChange {
    /// Resource ID.
    pub resource_id: i64,
    /// Resource kind.
    pub resource_type: ResourceType,
    /// Level to grant.
    pub access_level: AccessLevel,
    /// Revoke instead of grant.
    #[serde(rename = "_destroy", default, skip_serializing_if = "std::ops::Not::not")]
    pub destroy: bool,
}

impl PermissionChange {
    /// Grant `access_level` on a resource.
    pub fn grant(resource_id: i64, resource_type: ResourceType, access_level: AccessLevel) -> Self {
        Self {
            resource_id,
            resource_type,
            access_level,
            destroy: false,
        }
    }

    /// Revoke access to a resource.
    pub fn revoke(resource_id: i64, resource_type: ResourceType) -> Self {
        Self {
            destroy: true,
            ..Self::grant(resource_id, resource_type, AccessLevel::VIEWER)
        }
    }
}

static PERMISSION_CHANGE_RULES: LazyLock<RuleSet<PermissionChange>> = LazyLock::new(|| {
    RuleSet::<PermissionChange>::new()
        .min("resource_id", 1, |p| p.resource_id)
        .one_of("resource_type", ASSIGNABLE_RESOURCE_TYPES, |p| p.resource_type)
        .one_of("access_level", ASSIGNABLE_ACCESS_LEVELS, |p| p.access_level)
});

validated_by!(PermissionChange, PERMISSION_CHANGE_RULES);

static UPDATE_PERMISSIONS_RULES: LazyLock<RuleSet<UpdatePermissionsRequest>> =
    LazyLock::new(|| {
        RuleSet::<UpdatePermissionsRequest>::new()
            .not_empty_list("permissions", |r| r.permissions.as_slice())
            .each("permissions", |r| r.permissions.as_slice())
    });

validated_by!(UpdatePermissionsRequest, UPDATE_PERMISSIONS_RULES);

/// Reply to a permission change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePermissionsResponse {
    /// Server confirmation.
    pub message: String,
}

/// Current billing cycle usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingUsage {
    /// Cycle boundaries.
    pub billing: BillingCycle,
    /// Sandbox usage, if subscribed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testing: Option<ProductUsage>,
    /// Sending usage, if subscribed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sending: Option<ProductUsage>,
}

/// Start and end of a billing cycle, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingCycle {
    pub cycle_start: String,
    pub cycle_end: String,
}

/// Plan and counters for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUsage {
    /// Subscribed plan.
    pub plan: Plan,
    /// Product-specific counters.
    pub usage: Value,
}

/// A subscription plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan name.
    pub name: String,
}

/// A marketing contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Contact ID.
    pub id: ContactId,
    /// Email address.
    pub email: String,
    /// Custom field values.
    #[serde(default)]
    pub fields: Map<String, Value>,
    /// Lists the contact belongs to.
    #[serde(default)]
    pub list_ids: Vec<i64>,
    /// Subscription state.
    pub status: ContactStatus,
    /// Creation time, epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Last update time, epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// Single-contact reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactResponse {
    /// The contact.
    pub data: Contact,
}

/// Reply to a contact update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateContactResponse {
    /// Whether the contact was created or updated.
    pub action: ContactAction,
    /// The resulting contact.
    pub data: Contact,
}

/// Body of a contact creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateContactRequest {
    /// The new contact.
    pub contact: NewContact,
}

impl CreateContactRequest {
    /// A contact with only an email address.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            contact: NewContact {
                email: email.into(),
                fields: Map::new(),
                list_ids: Vec::new(),
            },
        }
    }
}

/// Fields of a new contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContact {
    /// Email address.
    pub email: String,
    /// Custom field values.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
    /// Lists to add the contact to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list_ids: Vec<i64>,
}

static NEW_CONTACT_RULES: LazyLock<RuleSet<NewContact>> = LazyLock::new(|| {
    RuleSet::<NewContact>::new()
        .not_empty("email", |c| c.email.as_str())
        .length("email", 3, 100, |c| c.email.as_str())
        .email("email", |c| c.email.as_str())
        .must("list_ids", "must contain only positive IDs", |c| {
            c.list_ids.iter().all(|id| *id > 0)
        })
});

validated_by!(NewContact, NEW_CONTACT_RULES);

static CREATE_CONTACT_RULES: LazyLock<RuleSet<CreateContactRequest>> = LazyLock::new(|| {
    RuleSet::<CreateContactRequest>::new().nested("contact", |r| &r.contact)
});

validated_by!(CreateContactRequest, CREATE_CONTACT_RULES);

/// Body of a contact update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateContactRequest {
    /// Changes to apply.
    pub contact: ContactUpdate,
}

/// Contact changes; at least one must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactUpdate {
    /// New email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Custom field values to set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,
    /// Lists to add the contact to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list_ids_included: Vec<i64>,
    /// Lists to remove the contact from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list_ids_excluded: Vec<i64>,
    /// Opt the contact out (or back in).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsubscribed: Option<bool>,
}

static CONTACT_UPDATE_RULES: LazyLock<RuleSet<ContactUpdate>> = LazyLock::new(|| {
    RuleSet::<ContactUpdate>::new()
        .at_least_one(
            &[
                "email",
                "fields",
                "list_ids_included",
                "list_ids_excluded",
                "unsubscribed",
            ],
            |c| {
                c.email.is_some()
                    || c.fields.is_some()
                    || !c.list_ids_included.is_empty()
                    || !c.list_ids_excluded.is_empty()
                    || c.unsubscribed.is_some()
            },
        )
        .length("email", 3, 100, |c| c.email.as_deref().unwrap_or_default())
        .email("email", |c| c.email.as_deref().unwrap_or_default())
});

validated_by!(ContactUpdate, CONTACT_UPDATE_RULES);

static UPDATE_CONTACT_RULES: LazyLock<RuleSet<UpdateContactRequest>> = LazyLock::new(|| {
    RuleSet::<UpdateContactRequest>::new().nested("contact", |r| &r.contact)
});

validated_by!(UpdateContactRequest, UPDATE_CONTACT_RULES);

/// A message captured by a sandbox inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandboxMessage {
    /// Message ID.
    pub id: i64,
    /// Owning inbox.
    pub inbox_id: i64,
    /// Subject line.
    pub subject: String,
    /// Sender address.
    pub from_email: String,
    /// Recipient address.
    pub to_email: String,
    /// Capture time, as returned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<String>,
    /// Whether the message was opened.
    #[serde(default)]
    pub is_read: bool,
    /// Blacklist check, when one was run.
    #[serde(
        default,
        with = "crate::flag_or_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub blacklists_report_info: Option<BlacklistsReport>,
}

/// Result of checking the sending domain and IP against blacklists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlacklistsReport {
    /// Overall verdict.
    pub result: String,
    /// Checked domain.
    pub domain: String,
    /// Checked IP.
    pub ip: String,
    /// Per-list outcomes.
    #[serde(default)]
    pub report: Vec<BlacklistEntry>,
}

/// Outcome for a single blacklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    pub name: String,
    pub url: String,
    pub in_black_list: bool,
}

/// Sender or recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    /// Address.
    pub email: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    /// An address without a display name.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

static EMAIL_ADDRESS_RULES: LazyLock<RuleSet<EmailAddress>> = LazyLock::new(|| {
    RuleSet::<EmailAddress>::new()
        .not_empty("email", |a| a.email.as_str())
        .email("email", |a| a.email.as_str())
});

validated_by!(EmailAddress, EMAIL_ADDRESS_RULES);

/// A transactional email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendEmailRequest {
    /// Sender.
    pub from: EmailAddress,
    /// Primary recipients.
    pub to: Vec<EmailAddress>,
    /// Carbon-copy recipients.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<EmailAddress>,
    /// Blind carbon-copy recipients.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<EmailAddress>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// HTML body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Category for analytics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl SendEmailRequest {
    /// A message with a sender and subject, to be completed by the caller.
    pub fn new(from: EmailAddress, subject: impl Into<String>) -> Self {
        Self {
            from,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: subject.into(),
            text: None,
            html: None,
            category: None,
        }
    }

    /// Add a primary recipient.
    pub fn to(mut self, recipient: EmailAddress) -> Self {
        self.to.push(recipient);
        self
    }

    /// Set the plain-text body.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the HTML body.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Set the analytics category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

static SEND_EMAIL_RULES: LazyLock<RuleSet<SendEmailRequest>> = LazyLock::new(|| {
    RuleSet::<SendEmailRequest>::new()
        .nested("from", |r| &r.from)
        .not_empty_list("to", |r| r.to.as_slice())
        .each("to", |r| r.to.as_slice())
        .each("cc", |r| r.cc.as_slice())
        .each("bcc", |r| r.bcc.as_slice())
        .not_empty("subject", |r| r.subject.as_str())
        .at_least_one(&["text", "html"], |r| r.text.is_some() || r.html.is_some())
        .length("category", 1, 255, |r| r.category.as_deref().unwrap_or_default())
});

validated_by!(SendEmailRequest, SEND_EMAIL_RULES);

/// Reply to a send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEmailResponse {
    /// Whether the message was accepted.
    pub success: bool,
    /// One ID per recipient.
    #[serde(default)]
    pub message_ids: Vec<MessageId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn account_reads_minimal_body() {
        let account: Account = serde_json::from_str(r#"{"id":1,"name":"Acme"}"#).unwrap();
        assert_eq!(
            account,
            Account {
                id: 1,
                name: "Acme".into(),
                access_levels: Vec::new(),
            }
        );
    }

    #[test]
    fn account_access_reads_enumerations() {
        let access: AccountAccess = serde_json::from_value(json!({
            "id": 4773,
            "specifier_type": "User",
            "specifier": {"id": 2, "email": "john@example.com", "name": "John"},
            "resources": [
                {"resource_id": 3816, "resource_type": "account", "access_level": "owner"}
            ],
            "permissions": {"can_read": true, "can_update": false, "can_destroy": false, "can_leave": true}
        }))
        .unwrap();

        assert_eq!(access.specifier_type, SpecifierType::USER);
        assert_eq!(access.resources[0].resource_type, ResourceType::ACCOUNT);
        assert_eq!(access.resources[0].access_level, AccessLevel::OWNER);
    }

    #[test]
    fn unknown_access_level_is_rejected() {
        let err = serde_json::from_value::<AccessResource>(json!({
            "resource_id": 1, "resource_type": "inbox", "access_level": "superuser"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("unknown AccessLevel value `superuser`"), "{err}");
    }

    #[test]
    fn permission_change_writes_destroy_only_when_set() {
        let request = UpdatePermissionsRequest {
            permissions: vec![
                PermissionChange::grant(1, ResourceType::PROJECT, AccessLevel::ADMIN),
                PermissionChange::revoke(2, ResourceType::INBOX),
            ],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"permissions": [
                {"resource_id": 1, "resource_type": "project", "access_level": "admin"},
                {"resource_id": 2, "resource_type": "inbox", "access_level": "viewer", "_destroy": true}
            ]})
        );
    }

    #[test]
    fn permission_change_rules() {
        let request = UpdatePermissionsRequest {
            permissions: vec![PermissionChange::grant(
                0,
                ResourceType::EMAIL_CAMPAIGN_PERMISSION_SCOPE,
                AccessLevel::OWNER,
            )],
        };
        assert_eq!(
            request.validate().errors(),
            [
                "`permissions[0].resource_id` must be greater than or equal to 1, got 0",
                "`permissions[0].resource_type` must be one of: account, billing, project, inbox, sending_domain, got `email_campaign_permission_scope`",
                "`permissions[0].access_level` must be one of: admin, viewer, got `owner`",
            ]
        );

        let empty = UpdatePermissionsRequest {
            permissions: Vec::new(),
        };
        assert_eq!(empty.validate().errors(), ["`permissions` must not be empty"]);
    }

    #[test]
    fn create_contact_rules() {
        assert!(CreateContactRequest::new("jane@example.com").validate().is_valid());
        assert_eq!(
            CreateContactRequest::new("jane").validate().errors(),
            ["`contact.email` is not a valid email address"]
        );

        let mut request = CreateContactRequest::new("");
        request.contact.list_ids = vec![1, -1];
        assert_eq!(
            request.validate().errors(),
            [
                "`contact.email` must not be empty",
                "`contact.list_ids` must contain only positive IDs",
            ]
        );
    }

    #[test]
    fn create_contact_omits_empty_collections() {
        assert_eq!(
            serde_json::to_value(CreateContactRequest::new("jane@example.com")).unwrap(),
            json!({"contact": {"email": "jane@example.com"}})
        );
    }

    #[test]
    fn update_contact_needs_one_change() {
        let err = UpdateContactRequest::default().validate();
        assert_eq!(
            err.errors(),
            ["at least one of `contact.email`, `contact.fields`, `contact.list_ids_included`, `contact.list_ids_excluded`, `contact.unsubscribed` must be provided"]
        );

        let request = UpdateContactRequest {
            contact: ContactUpdate {
                unsubscribed: Some(true),
                ..ContactUpdate::default()
            },
        };
        assert!(request.validate().is_valid());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"contact": {"unsubscribed": true}})
        );
    }

    #[test]
    fn contact_reads_identifier_and_status() {
        let response: UpdateContactResponse = serde_json::from_value(json!({
            "action": "updated",
            "data": {
                "id": "018dd5e3-f6d2-7c00-8f9b-e5c3f2d8a132",
                "email": "jane@example.com",
                "fields": {"first_name": "Jane"},
                "list_ids": [1],
                "status": "unsubscribed",
                "created_at": 1_700_000_000_000_i64,
                "updated_at": 1_700_000_000_100_i64
            }
        }))
        .unwrap();

        assert_eq!(response.action, ContactAction::UPDATED);
        assert_eq!(response.data.id.as_str(), "018dd5e3-f6d2-7c00-8f9b-e5c3f2d8a132");
        assert_eq!(response.data.status, ContactStatus::UNSUBSCRIBED);
    }

    #[test]
    fn sandbox_message_blacklist_report_shapes() {
        let base = json!({
            "id": 1, "inbox_id": 2, "subject": "Hi",
            "from_email": "a@example.com", "to_email": "b@example.com"
        });

        let mut flagged = base.clone();
        flagged["blacklists_report_info"] = json!(false);
        let message: SandboxMessage = serde_json::from_value(flagged).unwrap();
        assert_eq!(message.blacklists_report_info, None);

        let mut detailed = base;
        detailed["blacklists_report_info"] = json!({
            "result": "success", "domain": "example.com", "ip": "192.0.2.1",
            "report": [{"name": "Spamhaus", "url": "https://spamhaus.org", "in_black_list": false}]
        });
        let message: SandboxMessage = serde_json::from_value(detailed).unwrap();
        let report = message.blacklists_report_info.unwrap();
        assert_eq!(report.result, "success");
        assert_eq!(report.report[0].name, "Spamhaus");
    }

    #[test]
    fn send_email_rules() {
        let from = EmailAddress::new("sender@example.com").with_name("Sender");
        let valid = SendEmailRequest::new(from, "Hello")
            .to(EmailAddress::new("jane@example.com"))
            .text("Hi Jane");
        assert!(valid.validate().is_valid());

        let invalid = SendEmailRequest::new(EmailAddress::new("nobody"), " ")
            .to(EmailAddress::new("jane@example.com"))
            .to(EmailAddress::new(""));
        assert_eq!(
            invalid.validate().errors(),
            [
                "`from.email` is not a valid email address",
                "`to[1].email` must not be empty",
                "`subject` must not be empty",
                "at least one of `text`, `html` must be provided",
            ]
        );
    }

    #[test]
    fn blank_recipient_reports_one_violation() {
        let request = SendEmailRequest::new(EmailAddress::new("sender@example.com"), "Hello")
            .to(EmailAddress::new("  "))
            .text("Hi");
        assert_eq!(request.validate().errors(), ["`to[0].email` must not be empty"]);
    }

    #[test]
    fn send_response_reads_message_ids() {
        let response: SendEmailResponse =
            serde_json::from_str(r#"{"success":true,"message_ids":["0c7fd939-02cf-11ed-88c2-0a58a9feac02"]}"#)
                .unwrap();
        assert_eq!(
            response.message_ids,
            vec![MessageId::new("0c7fd939-02cf-11ed-88c2-0a58a9feac02")]
        );

        assert!(serde_json::from_str::<SendEmailResponse>(r#"{"success":true,"message_ids":[42]}"#).is_err());
    }
}
