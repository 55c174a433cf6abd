//! Immutable resource locations.

use crate::{Error, Result};
use std::fmt;
use url::Url;

/// Absolute location of an API resource.
///
/// Every operation returns a new value; the receiver is never modified.
///
/// ```
/// # use mailtrap_client::ResourceUri;
/// let base = ResourceUri::parse("https://mailtrap.io/api")?;
/// let contacts = base.append(["accounts"]).append([42]).append(["contacts"]);
/// assert_eq!(contacts.as_str(), "https://mailtrap.io/api/accounts/42/contacts");
/// assert_eq!(base.as_str(), "https://mailtrap.io/api");
/// # Ok::<(), mailtrap_client::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceUri(Url);

impl ResourceUri {
    /// Parse an absolute `http`/`https` location.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input).map_err(|e| Error::invalid_argument("uri", e.to_string()))?;
        Self::from_url(url)
    }

    /// Wrap an already parsed URL.
    pub fn from_url(url: Url) -> Result<Self> {
        if url.cannot_be_a_base() {
            return Err(Error::invalid_argument(
                "uri",
                format!("`{url}` cannot carry path segments"),
            ));
        }
        Ok(Self(url))
    }

    /// Append path segments, percent-encoding each one.
    ///
    /// Leading and trailing slashes are trimmed from every segment and empty
    /// segments are skipped, so `["/accounts/", "", "7"]` appends `accounts/7`.
    /// `.` and `..` are dropped as well; use [`ResourceUri::append_id`] for
    /// caller-supplied identifiers. Numbers render in their canonical decimal form.
    pub fn append<I>(&self, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let mut url = self.0.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in segments {
                let segment = segment.to_string();
                let segment = segment.trim_matches('/');
                if !segment.is_empty() {
                    path.push(segment);
                }
            }
        }
        Self(url)
    }

    /// Append one segment that addresses a single resource.
    ///
    /// Fails with [`Error::InvalidArgument`] when `id` is blank, `.`, or `..`.
    /// URL normalization drops such segments (percent-encoded dots included),
    /// which would address the parent collection instead.
    pub fn append_id(&self, id: impl fmt::Display) -> Result<Self> {
        let raw = id.to_string();
        let segment = raw.trim_matches('/');
        if segment.trim().is_empty() || segment == "." || segment == ".." {
            return Err(Error::invalid_argument(
                "id",
                format!("`{raw}` does not name a single resource"),
            ));
        }
        Ok(self.append([segment]))
    }

    /// Add a query parameter, replacing every existing value for `key`.
    pub fn append_query(&self, key: &str, value: impl fmt::Display) -> Self {
        let retained: Vec<(String, String)> = self
            .0
            .query_pairs()
            .filter(|(k, _)| k != key)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut url = self.0.clone();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(retained)
            .append_pair(key, &value.to_string());
        Self(url)
    }

    /// Non-empty path segments in order, as they appear on the wire.
    pub fn segments(&self) -> Vec<&str> {
        self.0
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Value of the first query parameter named `key`.
    pub fn query(&self, key: &str) -> Option<String> {
        self.0
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// The serialized location.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The underlying URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl std::str::FromStr for ResourceUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<ResourceUri> for Url {
    fn from(uri: ResourceUri) -> Self {
        uri.0
    }
}
