// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw configuration value as returned by a source.
//!
//! Sources hand back plain strings. Typing happens later, in the value resolver,
//! either by direct assignment to string fields or through a format unmarshaler.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw, untyped configuration value.
///
/// An empty value is still a value: the decoder never special-cases emptiness.
///
/// # Examples
///
/// ```
/// use tagcfg::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::from("name: Alice");
/// assert_eq!(value.as_bytes(), b"name: Alice");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigValue(String);

impl ConfigValue {
    /// Creates a new `ConfigValue` from a `String`.
    pub fn new(value: String) -> Self {
        ConfigValue(value)
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the raw bytes handed to format unmarshalers.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns `true` if the source returned an empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts the value into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue(s.to_string())
    }
}

impl From<ConfigValue> for String {
    fn from(value: ConfigValue) -> Self {
        value.0
    }
}

impl AsRef<str> for ConfigValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
