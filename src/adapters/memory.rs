// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory configuration source adapter.
//!
//! Values are partitioned by namespace, the way remote configuration centers
//! organize them. Every call is recorded so callers can inspect which keys were
//! fetched and with which options.

use crate::domain::options::{namespace_of, OpOption};
use crate::domain::{ConfigKey, ConfigValue};
use crate::ports::ConfigSource;
use std::collections::HashMap;
use std::sync::Mutex;

/// Namespace used when a fetch carries no namespace option.
pub const DEFAULT_NAMESPACE: &str = "application";

/// A single recorded call to [`MemorySource::get_string`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fetch {
    /// The requested key
    pub key: ConfigKey,
    /// The options passed with the request, in order
    pub options: Vec<OpOption>,
}

/// Configuration source backed by an in-memory map.
///
/// A missing key yields an empty value.
///
/// # Examples
///
/// ```rust
/// use tagcfg::adapters::MemorySource;
/// use tagcfg::domain::OpOption;
/// use tagcfg::ports::ConfigSource;
///
/// let source = MemorySource::new()
///     .with_value("foo", "default")
///     .with_namespaced_value("ns", "foo", "scoped");
///
/// assert_eq!(source.get_str("foo", &[]).as_str(), "default");
/// assert_eq!(source.get_str("foo", &[OpOption::namespace("ns")]).as_str(), "scoped");
/// assert_eq!(source.fetches().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    /// Values keyed by namespace, then by key
    namespaces: HashMap<String, HashMap<String, String>>,
    /// Recorded calls, in order
    fetches: Mutex<Vec<Fetch>>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value to the default namespace.
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_namespaced_value(DEFAULT_NAMESPACE, key, value)
    }

    /// Adds a value to the given namespace.
    pub fn with_namespaced_value(
        mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set_value(namespace, key, value);
        self
    }

    /// Inserts or replaces a value.
    pub fn set_value(
        &mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Returns the recorded calls, oldest first.
    pub fn fetches(&self) -> Vec<Fetch> {
        self.fetches
            .lock()
            .map(|fetches| fetches.clone())
            .unwrap_or_default()
    }

    /// Forgets all recorded calls.
    pub fn clear_fetches(&self) {
        if let Ok(mut fetches) = self.fetches.lock() {
            fetches.clear();
        }
    }
}

impl ConfigSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn get_string(&self, key: &ConfigKey, options: &[OpOption]) -> ConfigValue {
        if let Ok(mut fetches) = self.fetches.lock() {
            fetches.push(Fetch {
                key: key.clone(),
                options: options.to_vec(),
            });
        }

        let namespace = namespace_of(options).unwrap_or(DEFAULT_NAMESPACE);
        match self
            .namespaces
            .get(namespace)
            .and_then(|values| values.get(key.as_str()))
        {
            Some(value) => ConfigValue::from(value.as_str()),
            None => {
                tracing::trace!("Key '{}' not found in namespace '{}'", key, namespace);
                ConfigValue::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_name() {
        assert_eq!(MemorySource::new().name(), "memory");
    }

    #[test]
    fn test_missing_key_is_empty() {
        let source = MemorySource::new();
        assert!(source.get_str("nope", &[]).is_empty());
    }

    #[test]
    fn test_last_namespace_wins() {
        let source = MemorySource::new()
            .with_namespaced_value("a", "k", "from-a")
            .with_namespaced_value("b", "k", "from-b");
        let options = [OpOption::namespace("a"), OpOption::namespace("b")];
        assert_eq!(source.get_str("k", &options).as_str(), "from-b");
    }

    #[test]
    fn test_custom_options_do_not_change_namespace() {
        let source = MemorySource::new().with_value("k", "v");
        let options = [OpOption::custom("cluster", "blue")];
        assert_eq!(source.get_str("k", &options).as_str(), "v");
    }

    #[test]
    fn test_fetches_recorded_in_order() {
        let source = MemorySource::new();
        source.get_str("first", &[]);
        source.get_str("second", &[OpOption::namespace("ns")]);

        let fetches = source.fetches();
        assert_eq!(fetches.len(), 2);
        assert_eq!(fetches[0].key.as_str(), "first");
        assert_eq!(fetches[1].options, vec![OpOption::namespace("ns")]);

        source.clear_fetches();
        assert!(source.fetches().is_empty());
    }

    #[test]
    fn test_set_value_replaces() {
        let mut source = MemorySource::new().with_value("k", "old");
        source.set_value(DEFAULT_NAMESPACE, "k", "new");
        assert_eq!(source.get_str("k", &[]).as_str(), "new");
    }
}
