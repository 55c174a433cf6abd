//! Declarative request validation.
//!
//! A request type builds its [`RuleSet`] once, usually in a `static LazyLock`,
//! and implements [`Validate`] by running it. The executor validates every
//! request body before it is serialized, so an invalid request never reaches
//! the network.
//!
//! ```
//! use mailtrap_client::{RuleSet, Validate};
//! use std::sync::LazyLock;
//!
//! struct Rename {
//!     name: String,
//! }
//!
//! static RULES: LazyLock<RuleSet<Rename>> = LazyLock::new(|| {
//!     RuleSet::<Rename>::new()
//!         .not_empty("name", |r| r.name.as_str())
//!         .length("name", 1, 40, |r| r.name.as_str())
//! });
//!
//! impl Validate for Rename {
//!     fn collect_errors(&self, path: &str, errors: &mut Vec<String>) {
//!         RULES.check(self, path, errors);
//!     }
//! }
//!
//! let result = Rename { name: " ".into() }.validate();
//! assert_eq!(result.errors(), ["`name` must not be empty"]);
//! ```

use crate::{Error, Result, StringEnum};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern compiles")
});

/// Outcome of validating one request object.
///
/// Empty means valid. Messages keep rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    /// A result without errors.
    pub fn valid() -> Self {
        Self::default()
    }

    /// A result carrying `errors`.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// `true` when no rule was violated.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Rule violation messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Consume into the violation messages.
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// Fail with [`Error::Validation`] when `result` carries any error.
pub fn ensure_valid(result: ValidationResult, param: &'static str) -> Result<()> {
    if result.is_valid() {
        Ok(())
    } else {
        Err(Error::Validation {
            param,
            errors: result.into_errors(),
        })
    }
}

/// A value that can be checked before it is sent.
///
/// The default implementation accepts everything, so bodies without rules
/// only need an empty `impl Validate for T {}`.
pub trait Validate {
    /// Append violations to `errors`, prefixing field names with `path`.
    fn collect_errors(&self, path: &str, errors: &mut Vec<String>) {
        let _ = (path, errors);
    }

    /// Run every rule and gather the violations.
    fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        self.collect_errors("", &mut errors);
        ValidationResult::from_errors(errors)
    }
}

impl Validate for () {}

impl<T: Validate + ?Sized> Validate for &T {
    fn collect_errors(&self, path: &str, errors: &mut Vec<String>) {
        (**self).collect_errors(path, errors);
    }
}

type Check<T> = Box<dyn Fn(&T, &str, &mut Vec<String>) + Send + Sync>;

/// Ordered list of rules for `T`.
///
/// Built once and shared; checking never mutates it.
pub struct RuleSet<T> {
    rules: Vec<Check<T>>,
}

impl<T: 'static> RuleSet<T> {
    /// An empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    fn rule(mut self, check: impl Fn(&T, &str, &mut Vec<String>) + Send + Sync + 'static) -> Self {
        self.rules.push(Box::new(check));
        self
    }

    /// The string must contain something other than whitespace.
    pub fn not_empty(self, field: &'static str, get: fn(&T) -> &str) -> Self {
        self.rule(move |value, path, errors| {
            if get(value).trim().is_empty() {
                errors.push(format!("`{path}{field}` must not be empty"));
            }
        })
    }

    /// The collection must have at least one element.
    pub fn not_empty_list<E>(self, field: &'static str, get: fn(&T) -> &[E]) -> Self
    where
        E: 'static,
    {
        self.rule(move |value, path, errors| {
            if get(value).is_empty() {
                errors.push(format!("`{path}{field}` must not be empty"));
            }
        })
    }

    /// A non-blank string must be `min..=max` characters long.
    ///
    /// Blank strings pass; pair with [`RuleSet::not_empty`] to reject them.
    pub fn length(self, field: &'static str, min: usize, max: usize, get: fn(&T) -> &str) -> Self {
        self.rule(move |value, path, errors| {
            let text = get(value);
            let len = text.chars().count();
            if !text.trim().is_empty() && !(min..=max).contains(&len) {
                errors.push(format!(
                    "`{path}{field}` must be between {min} and {max} characters long, got {len}"
                ));
            }
        })
    }

    /// The number must be at least `min`.
    pub fn min(self, field: &'static str, min: i64, get: fn(&T) -> i64) -> Self {
        self.rule(move |value, path, errors| {
            let n = get(value);
            if n < min {
                errors.push(format!(
                    "`{path}{field}` must be greater than or equal to {min}, got {n}"
                ));
            }
        })
    }

    /// The enumeration value must be one of `allowed`.
    pub fn one_of<E>(self, field: &'static str, allowed: &'static [E], get: fn(&T) -> E) -> Self
    where
        E: StringEnum + PartialEq,
    {
        self.rule(move |value, path, errors| {
            let actual = get(value);
            if !allowed.contains(&actual) {
                let expected = allowed
                    .iter()
                    .map(StringEnum::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                errors.push(format!(
                    "`{path}{field}` must be one of: {expected}, got `{}`",
                    actual.as_str()
                ));
            }
        })
    }

    /// A non-blank string must look like an email address.
    ///
    /// Blank strings pass; pair with [`RuleSet::not_empty`] to reject them.
    pub fn email(self, field: &'static str, get: fn(&T) -> &str) -> Self {
        self.rule(move |value, path, errors| {
            let text = get(value);
            if !text.trim().is_empty() && !EMAIL.is_match(text) {
                errors.push(format!("`{path}{field}` is not a valid email address"));
            }
        })
    }

    /// At least one of `fields` must be provided, as decided by `present`.
    pub fn at_least_one(self, fields: &'static [&'static str], present: fn(&T) -> bool) -> Self {
        self.rule(move |value, path, errors| {
            if !present(value) {
                let names = fields
                    .iter()
                    .map(|field| format!("`{path}{field}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                errors.push(format!("at least one of {names} must be provided"));
            }
        })
    }

    /// Free-form predicate; `message` completes "`field` ...".
    pub fn must(self, field: &'static str, message: &'static str, check: fn(&T) -> bool) -> Self {
        self.rule(move |value, path, errors| {
            if !check(value) {
                errors.push(format!("`{path}{field}` {message}"));
            }
        })
    }

    /// Validate a nested object with its own rules.
    pub fn nested<E>(self, field: &'static str, get: fn(&T) -> &E) -> Self
    where
        E: Validate + 'static,
    {
        self.rule(move |value, path, errors| {
            get(value).collect_errors(&format!("{path}{field}."), errors);
        })
    }

    /// Validate every element of a collection with the element's own rules.
    pub fn each<E>(self, field: &'static str, get: fn(&T) -> &[E]) -> Self
    where
        E: Validate + 'static,
    {
        self.rule(move |value, path, errors| {
            for (index, item) in get(value).iter().enumerate() {
                item.collect_errors(&format!("{path}{field}[{index}]."), errors);
            }
        })
    }

    /// Run the rules in order, appending violations to `errors`.
    pub fn check(&self, value: &T, path: &str, errors: &mut Vec<String>) {
        for rule in &self.rules {
            rule(value, path, errors);
        }
    }

    /// Run the rules against a top-level value.
    pub fn validate(&self, value: &T) -> ValidationResult {
        let mut errors = Vec::new();
        self.check(value, "", &mut errors);
        ValidationResult::from_errors(errors)
    }
}

impl<T: 'static> Default for RuleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string_enum::string_enum;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    string_enum! {
        pub struct Role {
            OWNER = "owner",
            ADMIN = "admin",
            VIEWER = "viewer",
        }
    }

    const ASSIGNABLE: &[Role] = &[Role::ADMIN, Role::VIEWER];

    #[derive(Debug, Clone)]
    struct Grant {
        resource_id: i64,
        role: Role,
    }

    static GRANT_RULES: LazyLock<RuleSet<Grant>> = LazyLock::new(|| {
        RuleSet::<Grant>::new()
            .min("resource_id", 1, |g| g.resource_id)
            .one_of("role", ASSIGNABLE, |g| g.role)
    });

    impl Validate for Grant {
        fn collect_errors(&self, path: &str, errors: &mut Vec<String>) {
            GRANT_RULES.check(self, path, errors);
        }
    }

    #[derive(Debug, Clone)]
    struct Invite {
        email: String,
        name: Option<String>,
        note: Option<String>,
        grants: Vec<Grant>,
    }

    static INVITE_RULES: LazyLock<RuleSet<Invite>> = LazyLock::new(|| {
        RuleSet::<Invite>::new()
            .not_empty("email", |i| i.email.as_str())
            .email("email", |i| i.email.as_str())
            .length("name", 2, 10, |i| i.name.as_deref().unwrap_or_default())
            .at_least_one(&["name", "note"], |i| i.name.is_some() || i.note.is_some())
            .not_empty_list("grants", |i| i.grants.as_slice())
            .each("grants", |i| i.grants.as_slice())
    });

    impl Validate for Invite {
        fn collect_errors(&self, path: &str, errors: &mut Vec<String>) {
            INVITE_RULES.check(self, path, errors);
        }
    }

    fn valid_invite() -> Invite {
        Invite {
            email: "jane@example.com".into(),
            name: Some("Jane".into()),
            note: None,
            grants: vec![Grant {
                resource_id: 3,
                role: Role::ADMIN,
            }],
        }
    }

    #[test]
    fn valid_request_has_no_errors() {
        let result = valid_invite().validate();
        assert!(result.is_valid());
        assert_eq!(ensure_valid(result, "invite").ok(), Some(()));
    }

    #[test]
    fn not_empty_rejects_whitespace() {
        let invite = Invite {
            email: "   ".into(),
            ..valid_invite()
        };
        assert_eq!(invite.validate().errors(), ["`email` must not be empty"]);
    }

    #[test]
    fn email_syntax_is_checked() {
        for bad in ["jane", "jane@", "@example.com", "jane@example", "ja ne@example.com", "a@b@c.com"] {
            let invite = Invite {
                email: bad.into(),
                ..valid_invite()
            };
            assert_eq!(
                invite.validate().errors(),
                ["`email` is not a valid email address"],
                "{bad}"
            );
        }
        for good in ["jane@example.com", "jane.doe+tag@mail.example.co.uk"] {
            let invite = Invite {
                email: good.into(),
                ..valid_invite()
            };
            assert!(invite.validate().is_valid(), "{good}");
        }
    }

    #[test]
    fn length_counts_characters() {
        let invite = Invite {
            name: Some("J".into()),
            ..valid_invite()
        };
        assert_eq!(
            invite.validate().errors(),
            ["`name` must be between 2 and 10 characters long, got 1"]
        );

        let invite = Invite {
            name: Some("Jöhänñå".into()),
            ..valid_invite()
        };
        assert!(invite.validate().is_valid());
    }

    #[test]
    fn at_least_one_of_cross_field() {
        let invite = Invite {
            name: None,
            note: None,
            ..valid_invite()
        };
        assert_eq!(
            invite.validate().errors(),
            ["at least one of `name`, `note` must be provided"]
        );
    }

    #[test]
    fn elements_are_validated_with_index_paths() {
        let invite = Invite {
            grants: vec![
                Grant {
                    resource_id: 1,
                    role: Role::VIEWER,
                },
                Grant {
                    resource_id: 0,
                    role: Role::OWNER,
                },
            ],
            ..valid_invite()
        };
        assert_eq!(
            invite.validate().errors(),
            [
                "`grants[1].resource_id` must be greater than or equal to 1, got 0",
                "`grants[1].role` must be one of: admin, viewer, got `owner`",
            ]
        );
    }

    #[test]
    fn errors_accumulate_in_rule_order() {
        let invite = Invite {
            email: String::new(),
            name: None,
            note: None,
            grants: Vec::new(),
        };
        assert_eq!(
            invite.validate().errors(),
            [
                "`email` must not be empty",
                "at least one of `name`, `note` must be provided",
                "`grants` must not be empty",
            ]
        );
    }

    #[test]
    fn ensure_valid_carries_messages_and_param() {
        let invite = Invite {
            email: String::new(),
            ..valid_invite()
        };
        let err = ensure_valid(invite.validate(), "invite").unwrap_err();
        match err {
            Error::Validation { param, errors } => {
                assert_eq!(param, "invite");
                assert_eq!(errors, vec!["`email` must not be empty".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn must_and_nested_rules() {
        struct Wrapper {
            grant: Grant,
        }

        let rules = RuleSet::<Wrapper>::new()
            .must("grant", "must not target resource 13", |w| w.grant.resource_id != 13)
            .nested("grant", |w| &w.grant);

        let result = rules.validate(&Wrapper {
            grant: Grant {
                resource_id: 13,
                role: Role::OWNER,
            },
        });
        assert_eq!(
            result.errors(),
            [
                "`grant` must not target resource 13",
                "`grant.role` must be one of: admin, viewer, got `owner`",
            ]
        );
    }

    #[test]
    fn blank_string_reports_only_emptiness() {
        let invite = Invite {
            email: " \t ".into(),
            name: Some("  ".into()),
            ..valid_invite()
        };
        assert_eq!(invite.validate().errors(), ["`email` must not be empty"]);
    }

    #[test]
    fn rule_sets_are_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleSet<Grant>>();
        assert_send_sync::<RuleSet<Invite>>();
    }

    #[test]
    fn unit_is_always_valid() {
        assert!(().validate().is_valid());
    }

    proptest! {
        #[test]
        fn validate_is_idempotent(
            email in "[a-z@. ]{0,16}",
            name in proptest::option::of("[a-zA-Z]{0,12}"),
            ids in prop::collection::vec(-2i64..4, 0..4),
        ) {
            let invite = Invite {
                email,
                name,
                note: None,
                grants: ids
                    .into_iter()
                    .map(|resource_id| Grant { resource_id, role: Role::VIEWER })
                    .collect(),
            };
            let first = invite.validate();
            let second = invite.validate();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(ensure_valid(first.clone(), "invite").is_err(), !first.is_valid());
        }
    }
}
