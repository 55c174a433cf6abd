//! Open-set string enumerations.
//!
//! Each concrete type owns a closed list of legal strings, while the JSON
//! conversion below is written once, generically over [`StringEnum`].

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A string-backed value restricted to a closed set of legal strings.
pub trait StringEnum: Sized + Copy + Send + Sync + 'static {
    /// Type name used in error messages.
    const TYPE_NAME: &'static str;

    /// Every legal value, in declaration order.
    const VALUES: &'static [Self];

    /// The wire representation.
    fn as_str(&self) -> &'static str;

    /// Look up the value whose wire form is exactly `value`.
    fn from_wire(value: &str) -> Option<Self> {
        Self::VALUES.iter().copied().find(|v| v.as_str() == value)
    }
}

/// A string that is not a legal value of the target enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {type_name} value `{value}`, expected one of: {expected}")]
pub struct UnknownValue {
    /// Name of the enumeration type.
    pub type_name: &'static str,
    /// The rejected string.
    pub value: String,
    /// Comma-separated legal values.
    pub expected: String,
}

/// Parse `value` into `T`, matching case exactly.
pub fn parse<T: StringEnum>(value: &str) -> Result<T, UnknownValue> {
    T::from_wire(value).ok_or_else(|| UnknownValue {
        type_name: T::TYPE_NAME,
        value: value.to_string(),
        expected: T::VALUES
            .iter()
            .map(StringEnum::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Serde `serialize_with` target: emits the underlying string.
pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: StringEnum,
    S: Serializer,
{
    serializer.serialize_str(value.as_str())
}

/// Serde `deserialize_with` target: maps a JSON string onto a legal value of `T`.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: StringEnum,
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(StringEnumVisitor(PhantomData))
}

struct StringEnumVisitor<T>(PhantomData<T>);

impl<T: StringEnum> Visitor<'_> for StringEnumVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a {} string", T::TYPE_NAME)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<T, E> {
        parse(value).map_err(E::custom)
    }
}

/// Declare a [`StringEnum`] newtype with its legal values as associated constants.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name(&'static str);

        impl $name {
            $(
                $(#[$vmeta])*
                pub const $variant: Self = Self($value);
            )+

            /// The wire representation.
            pub fn as_str(&self) -> &'static str {
                self.0
            }
        }

        impl $crate::StringEnum for $name {
            const TYPE_NAME: &'static str = stringify!($name);
            const VALUES: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::string_enum::UnknownValue;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $crate::string_enum::parse(s)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                $crate::string_enum::serialize(self, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                $crate::string_enum::deserialize(deserializer)
            }
        }
    };
}

pub(crate) use string_enum;
