//! Config value types that can be switched off: `Limit` and the `optional` serde adapter.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{NONE, UNBOUNDED};

/// A cap that may be disabled. Serialized as an integer or `"unbounded"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Bounded(usize),
    Unbounded,
}

impl Limit {
    pub fn get(self) -> Option<usize> {
        match self {
            Limit::Bounded(n) => Some(n),
            Limit::Unbounded => None,
        }
    }

    /// Whether `count` items fit under this limit.
    pub fn allows(self, count: usize) -> bool {
        match self {
            Limit::Bounded(n) => count <= n,
            Limit::Unbounded => true,
        }
    }
}

impl From<usize> for Limit {
    fn from(n: usize) -> Self {
        Limit::Bounded(n)
    }
}

impl From<Option<usize>> for Limit {
    fn from(n: Option<usize>) -> Self {
        n.map_or(Limit::Unbounded, Limit::Bounded)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Bounded(n) => write!(f, "{n}"),
            Limit::Unbounded => f.write_str(UNBOUNDED),
        }
    }
}

impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Limit::Bounded(n) => serializer.serialize_u64(*n as u64),
            Limit::Unbounded => serializer.serialize_str(UNBOUNDED),
        }
    }
}

impl<'de> Deserialize<'de> for Limit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Count(usize),
            Marker(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Count(n) => Ok(Limit::Bounded(n)),
            Repr::Marker(s) if s.eq_ignore_ascii_case(UNBOUNDED) || s.eq_ignore_ascii_case(NONE) => {
                Ok(Limit::Unbounded)
            }
            Repr::Marker(s) => Err(D::Error::custom(format!(
                "expected a count or \"{UNBOUNDED}\", got \"{s}\""
            ))),
        }
    }
}

/// Serde adapter for `Option<T>` fields whose default is `Some`: `"none"` unsets them.
pub mod optional {
    use super::*;

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_str(NONE),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Value(T),
            Marker(String),
        }

        match Repr::<T>::deserialize(deserializer)? {
            Repr::Value(v) => Ok(Some(v)),
            Repr::Marker(s) if s.eq_ignore_ascii_case(NONE) => Ok(None),
            Repr::Marker(s) => Err(D::Error::custom(format!(
                "expected a value or \"{NONE}\", got \"{s}\""
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct Wrapper {
        limit: Limit,
        #[serde(with = "optional")]
        factor: Option<f64>,
    }

    #[test]
    fn limit_parses_count_and_marker() {
        let w: Wrapper = toml::from_str("limit = 7\nfactor = 0.5").unwrap();
        assert_eq!(w.limit, Limit::Bounded(7));
        assert_eq!(w.factor, Some(0.5));

        let w: Wrapper = toml::from_str("limit = \"unbounded\"\nfactor = \"none\"").unwrap();
        assert_eq!(w.limit, Limit::Unbounded);
        assert_eq!(w.factor, None);
    }

    #[test]
    fn limit_rejects_unknown_marker() {
        assert!(toml::from_str::<Wrapper>("limit = \"lots\"\nfactor = 1.0").is_err());
    }

    #[test]
    fn unbounded_allows_everything() {
        assert!(Limit::Unbounded.allows(usize::MAX));
        assert!(Limit::Bounded(3).allows(3));
        assert!(!Limit::Bounded(3).allows(4));
    }
}
