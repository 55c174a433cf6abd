//! Opaque identifier wrappers.
//!
//! These exist so a message ID can't be passed where a contact ID is expected.
//! On the wire they are plain JSON strings, and nothing else is accepted.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Unwrap into the raw identifier.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer
                    .deserialize_str(IdVisitor($what))
                    .map(Self)
            }
        }
    };
}

/// Accepts only string tokens.
struct IdVisitor(&'static str);

impl Visitor<'_> for IdVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} as a JSON string", self.0)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
        Ok(value)
    }
}

identifier!(
    /// Identifier of a sent message, as returned by the sending API.
    MessageId,
    "a message identifier"
);

identifier!(
    /// Identifier of a contact.
    ContactId,
    "a contact identifier"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_string_token() {
        let id: MessageId = serde_json::from_str(r#""abc123""#).unwrap();
        assert_eq!(id, MessageId::new("abc123"));
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn writes_plain_string() {
        let json = serde_json::to_string(&ContactId::from("018dd5e3-f6d2")).unwrap();
        assert_eq!(json, r#""018dd5e3-f6d2""#);
    }

    #[test]
    fn rejects_number_token() {
        let err = serde_json::from_str::<MessageId>("123").unwrap_err();
        assert!(
            err.to_string()
                .contains("invalid type: integer `123`, expected a message identifier as a JSON string"),
            "{err}"
        );
    }

    #[test]
    fn rejects_object_token() {
        let err = serde_json::from_str::<MessageId>(r#"{"id":"abc"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid type: map"), "{err}");
    }

    #[test]
    fn rejects_null_token() {
        assert!(serde_json::from_str::<ContactId>("null").is_err());
    }

    #[test]
    fn reads_inside_collections() {
        let ids: Vec<MessageId> = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(ids, vec![MessageId::new("a"), MessageId::new("b")]);
    }
}
