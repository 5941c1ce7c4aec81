//! Dotted version numbers with a total component-wise ordering.
//!
//! A [`VersionSpec`] is parsed from a string such as `"5.2.0"` and compares
//! lexicographically over its numeric components. Missing trailing components
//! are treated as zero, so `"5.2"` and `"5.2.0"` are equal.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::error::CompatError;

/// An immutable dotted version number.
///
/// # Examples
///
/// ```
/// use buildcompat::version::VersionSpec;
///
/// let a: VersionSpec = "5.2".parse()?;
/// let b: VersionSpec = "5.2.0".parse()?;
/// let c: VersionSpec = "5.2.1".parse()?;
///
/// assert_eq!(a, b);
/// assert!(b < c);
/// assert_eq!(c.to_string(), "5.2.1");
/// # Ok::<(), buildcompat::error::CompatError>(())
/// ```
#[derive(Debug, Clone)]
pub struct VersionSpec {
    components: Vec<u64>,
    text: String,
}

impl VersionSpec {
    /// Build a version directly from its numeric components.
    pub fn from_components(components: Vec<u64>) -> Self {
        let text = components
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        Self { components, text }
    }

    /// The numeric components exactly as written, trailing zeros included.
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Components with trailing zeros stripped; the canonical form used for
    /// comparison, equality and hashing.
    fn significant(&self) -> &[u64] {
        let mut end = self.components.len();
        while end > 0 && self.components[end - 1] == 0 {
            end -= 1;
        }
        &self.components[..end]
    }
}

impl FromStr for VersionSpec {
    type Err = CompatError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let malformed = || CompatError::MalformedVersion {
            input: input.to_string(),
        };
        if input.is_empty() {
            return Err(malformed());
        }
        let components = input
            .split('.')
            .map(|part| part.parse::<u64>().map_err(|_| malformed()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            components,
            text: input.to_string(),
        })
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for VersionSpec {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for VersionSpec {}

impl Ord for VersionSpec {
    fn cmp(&self, other: &Self) -> Ordering {
        self.significant().cmp(other.significant())
    }
}

impl PartialOrd for VersionSpec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Hash must agree with Eq, so it covers the zero-stripped form only.
impl Hash for VersionSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl Serialize for VersionSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for VersionSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> VersionSpec {
        text.parse().expect("test version should parse")
    }

    #[test]
    fn test_parse_round_trips_display() {
        for text in ["5", "5.0.0", "5.124.7", "0.9"] {
            assert_eq!(v(text).to_string(), text, "display should echo the input");
        }
    }

    #[test]
    fn test_trailing_zeros_are_insignificant() {
        assert_eq!(v("5.2"), v("5.2.0"));
        assert_eq!(v("5.2"), v("5.2.0.0"));
        assert!(v("5.2") < v("5.2.1"));
    }

    #[test]
    fn test_component_wise_ordering() {
        assert!(v("5.0.0") < v("5.2.0"));
        assert!(v("5.2.2") < v("5.3.3"));
        assert!(v("5.9.0") < v("5.20.0"), "components compare numerically, not textually");
        assert!(v("5.110.4") < v("5.113.0"));
    }

    #[test]
    fn test_malformed_inputs_are_rejected() {
        for input in ["", "5..2", "5.x", "1.2.", "v5.0", " 5.0"] {
            let parsed = input.parse::<VersionSpec>();
            assert!(
                matches!(parsed, Err(CompatError::MalformedVersion { .. })),
                "{input:?} should fail to parse"
            );
        }
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(v("5.2"));
        assert!(set.contains(&v("5.2.0")));
    }

    #[test]
    fn test_from_components() {
        let spec = VersionSpec::from_components(vec![5, 6, 16]);
        assert_eq!(spec.to_string(), "5.6.16");
        assert_eq!(spec, v("5.6.16"));
    }

    #[test]
    fn test_serde_uses_dotted_string() {
        let spec = v("5.195.1");
        let json = serde_json::to_string(&spec).expect("serialize");
        assert_eq!(json, "\"5.195.1\"");
        let back: VersionSpec = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, spec);
    }
}
