//! Fields that arrive either as a boolean or as a detail object.
//!
//! The API reports some optional details as `false` (or `true`) when there is
//! nothing to show and as a full object otherwise. Use with
//! `#[serde(default, with = "crate::flag_or_object", skip_serializing_if = "Option::is_none")]`
//! on an `Option<T>` field; callers only ever see `None` or `Some(detail)`.
//!
//! Writing always produces the object form. A boolean read from the wire is
//! not reproduced on write.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Write `Some(detail)` as its object form and `None` as `null`.
pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(detail) => detail.serialize(serializer),
        None => serializer.serialize_none(),
    }
}

/// Read a boolean as `None` and an object as `Some(detail)`.
///
/// Every other token, `null` included, is rejected.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FlagOrObjectVisitor(PhantomData))
}

struct FlagOrObjectVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for FlagOrObjectVisitor<T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean or an object")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        T::deserialize(de::value::MapAccessDeserializer::new(map)).map(Some)
    }
}
