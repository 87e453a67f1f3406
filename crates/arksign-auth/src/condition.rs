//! Typed access conditions attached to a signed URL.
//!
//! Callers supply conditions as loose `key -> value` pairs. Keys are
//! canonicalized on insertion (see [`crate::canonical::canonical_key`]), so
//! `Client-IP`, `client-ip` and `client_ip` all address the same entry.
//!
//! Two canonical keys are reserved and change how the string-to-sign is laid
//! out: `method` and `path_prefix`. Every other key is an opaque custom
//! condition that is bound into the signature as a `key:value` line and
//! announced in the query by a presence marker.

use std::collections::BTreeMap;

use crate::canonical::canonical_key;

/// Canonical key of the HTTP method condition.
pub const METHOD_KEY: &str = "method";

/// Canonical key of the path prefix condition.
pub const PATH_PREFIX_KEY: &str = "path_prefix";

/// A condition name with dedicated handling in the signing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedCondition {
    /// HTTP method the URL is valid for. Signed positionally, never put in the query.
    Method,
    /// Path prefix that replaces the URL path in the string-to-sign.
    PathPrefix,
}

impl ReservedCondition {
    /// Resolve a canonical key to a reserved condition, if it is one.
    #[must_use]
    pub fn from_canonical_key(key: &str) -> Option<Self> {
        match key {
            METHOD_KEY => Some(Self::Method),
            PATH_PREFIX_KEY => Some(Self::PathPrefix),
            _ => None,
        }
    }

    /// The canonical key of this condition.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Method => METHOD_KEY,
            Self::PathPrefix => PATH_PREFIX_KEY,
        }
    }
}

/// A single condition, borrowed from a [`ConditionSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition<'a> {
    /// One of the reserved conditions.
    Reserved {
        /// Which reserved condition this is.
        kind: ReservedCondition,
        /// Raw value supplied by the caller.
        value: &'a str,
    },
    /// An opaque condition bound into the signature.
    Custom {
        /// Canonical key.
        name: &'a str,
        /// Raw value supplied by the caller.
        value: &'a str,
    },
}

/// A set of conditions keyed by canonical name.
///
/// Iteration is always in ascending byte order of the canonical key,
/// independent of insertion order.
///
/// # Examples
///
/// ```
/// use arksign_auth::condition::ConditionSet;
///
/// let conditions: ConditionSet = [("Client-IP", "103.253.132.65"), ("method", "HEAD")]
///     .into_iter()
///     .collect();
/// assert_eq!(conditions.get("client_ip"), Some("103.253.132.65"));
/// assert_eq!(conditions.method(), Some("HEAD"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionSet {
    entries: BTreeMap<String, String>,
}

impl ConditionSet {
    /// Create an empty condition set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a condition under the canonical form of `key`.
    ///
    /// Returns the previous value stored under the same canonical key.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> Option<String> {
        self.entries.insert(canonical_key(key), value.into())
    }

    /// Look up a condition by any spelling of its key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&canonical_key(key)).map(String::as_str)
    }

    /// Whether a condition exists under the canonical form of `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&canonical_key(key))
    }

    /// The `method` condition, if present.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.get_canonical(METHOD_KEY)
    }

    /// The `path_prefix` condition, if present.
    #[must_use]
    pub fn path_prefix(&self) -> Option<&str> {
        self.get_canonical(PATH_PREFIX_KEY)
    }

    /// Iterate over every condition, classified, in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = Condition<'_>> {
        self.entries.iter().map(|(name, value)| {
            match ReservedCondition::from_canonical_key(name) {
                Some(kind) => Condition::Reserved { kind, value },
                None => Condition::Custom { name, value },
            }
        })
    }

    /// Iterate over the custom conditions only, in canonical key order.
    pub fn custom(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter_map(|condition| match condition {
            Condition::Custom { name, value } => Some((name, value)),
            Condition::Reserved { .. } => None,
        })
    }

    /// Number of conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_canonical(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for ConditionSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
