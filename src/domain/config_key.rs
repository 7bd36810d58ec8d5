// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key newtype.
//!
//! A `ConfigKey` names a value inside a remote configuration source. Keys are opaque
//! to the decoder: any string is accepted, and the empty string never reaches a
//! source because an empty tag key means "recurse into a nested record".

use std::fmt;

/// A type-safe wrapper for configuration keys.
///
/// # Examples
///
/// ```
/// use tagcfg::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("database.host");
/// assert_eq!(key.as_str(), "database.host");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the key is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_key_from_str() {
        let key = ConfigKey::from("test.key");
        assert_eq!(key.as_str(), "test.key");
        assert!(!key.is_empty());
    }

    #[test]
    fn test_config_key_display() {
        let key = ConfigKey::from("test.key");
        assert_eq!(format!("{}", key), "test.key");
    }

    #[test]
    fn test_config_key_hash() {
        let mut map = HashMap::new();
        map.insert(ConfigKey::from("test.key"), "value1");

        assert_eq!(map.get(&ConfigKey::from("test.key")), Some(&"value1"));
        assert_eq!(map.get(&ConfigKey::from("other.key")), None);
    }

    #[test]
    fn test_string_from_config_key() {
        let s: String = ConfigKey::new("a,b".to_string()).into();
        assert_eq!(s, "a,b");
    }

    #[test]
    fn test_config_key_empty() {
        assert!(ConfigKey::from("").is_empty());
    }
}
