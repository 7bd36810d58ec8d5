// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable configuration source adapter.
//!
//! This module provides a source that answers fetches from environment variables.
//! The namespace in effect becomes part of the variable name, so namespaced
//! records can be overridden per environment without a remote service.

use crate::domain::options::{namespace_of, OpOption};
use crate::domain::{ConfigKey, ConfigValue};
use crate::ports::ConfigSource;
use std::collections::HashMap;
use std::env;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Configuration source backed by environment variables.
///
/// A fetch of `key` under namespace `ns` reads the variable
/// `{prefix}{NS}_{KEY}`; without a namespace option it reads `{prefix}{KEY}`.
/// Namespace and key are uppercased and every `.`, `-` or `/` becomes `_`.
/// Unset variables yield an empty value. Variables are read on every fetch.
///
/// # Examples
///
/// ```rust
/// use tagcfg::adapters::EnvVarSource;
///
/// let source = EnvVarSource::with_prefix("MYAPP_");
/// assert_eq!(source.variable_name("db.host", None), "MYAPP_DB_HOST");
/// assert_eq!(source.variable_name("host", Some("database")), "MYAPP_DATABASE_HOST");
/// ```
#[derive(Debug, Default)]
pub struct EnvVarSource {
    /// Optional prefix prepended to every variable name
    prefix: Option<String>,
    /// Fixed variables used instead of the process environment
    values: Option<HashMap<String, String>>,
}

impl EnvVarSource {
    /// Creates a source over the process environment without a prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source over the process environment with a variable prefix.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Prepended verbatim to every variable name (e.g., "APP_")
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            values: None,
        }
    }

    /// Creates a source with pre-populated variables for testing.
    ///
    /// **Note**: This method is primarily intended for testing. The map is keyed
    /// by final variable names, e.g. `"DATABASE_HOST"`.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            prefix: None,
            values: Some(values),
        }
    }

    /// Returns the variable name a fetch of `key` under `namespace` reads.
    pub fn variable_name(&self, key: &str, namespace: Option<&str>) -> String {
        let mut name = self.prefix.clone().unwrap_or_default();
        if let Some(ns) = namespace {
            name.push_str(&normalize(ns));
            name.push('_');
        }
        name.push_str(&normalize(key));
        name
    }

    fn lookup(&self, name: &str) -> Option<String> {
        match &self.values {
            Some(values) => values.get(name).cloned(),
            None => env::var(name).ok(),
        }
    }
}

fn normalize(part: &str) -> String {
    part.chars()
        .map(|c| match c {
            '.' | '-' | '/' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

impl ConfigSource for EnvVarSource {
    fn name(&self) -> &str {
        "env"
    }

    fn get_string(&self, key: &ConfigKey, options: &[OpOption]) -> ConfigValue {
        let name = self.variable_name(key.as_str(), namespace_of(options));

        match self.lookup(&name) {
            Some(value) if value.len() > MAX_ENV_VALUE_LEN => {
                tracing::debug!(
                    "Ignoring oversized environment variable '{}': {} bytes (max {})",
                    name,
                    value.len(),
                    MAX_ENV_VALUE_LEN
                );
                ConfigValue::default()
            }
            Some(value) => ConfigValue::from(value),
            None => {
                tracing::trace!("Environment variable '{}' is not set", name);
                ConfigValue::default()
            }
        }
    }
}
