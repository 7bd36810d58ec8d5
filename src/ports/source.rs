// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! This module defines the `ConfigSource` trait, the port through which the decoder
//! reads raw values. Network access, caching and change notification all live
//! behind it and are invisible to the decoder.

use crate::domain::options::OpOption;
use crate::domain::{ConfigKey, ConfigValue};

/// A trait for configuration sources.
///
/// A source answers "what is the raw string for this key under these options".
/// The call never fails from the decoder's point of view: a missing key is the
/// source's business, typically answered with an empty value.
///
/// # Options
///
/// Options arrive in composition order. When several namespace options are
/// present, the last one wins.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow for use in multi-threaded contexts.
///
/// # Examples
///
/// ```rust
/// use tagcfg::ports::ConfigSource;
/// use tagcfg::domain::{ConfigKey, ConfigValue};
/// use tagcfg::domain::options::OpOption;
///
/// struct Echo;
///
/// impl ConfigSource for Echo {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn get_string(&self, key: &ConfigKey, _options: &[OpOption]) -> ConfigValue {
///         ConfigValue::from(key.as_str())
///     }
/// }
///
/// assert_eq!(Echo.get_str("foo", &[]).as_str(), "foo");
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the name of this configuration source.
    ///
    /// This name is used for logging and debugging. It should be a short,
    /// descriptive identifier like "memory", "env", "apollo".
    fn name(&self) -> &str;

    /// Returns the raw value stored under `key`.
    ///
    /// # Arguments
    ///
    /// * `key` - The configuration key, never empty when called by the decoder
    /// * `options` - Backend options, inherited ones first, namespace last
    fn get_string(&self, key: &ConfigKey, options: &[OpOption]) -> ConfigValue;

    /// Returns the raw value stored under a key given as a string slice.
    ///
    /// Equivalent to calling `get_string(&ConfigKey::from(key), options)`.
    fn get_str(&self, key: &str, options: &[OpOption]) -> ConfigValue {
        self.get_string(&ConfigKey::from(key), options)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get_string(&self, key: &ConfigKey, options: &[OpOption]) -> ConfigValue {
        (**self).get_string(key, options)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get_string(&self, key: &ConfigKey, options: &[OpOption]) -> ConfigValue {
        (**self).get_string(key, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::options::namespace_of;

    // Test implementation of ConfigSource for testing purposes
    struct NamespaceEcho;

    impl ConfigSource for NamespaceEcho {
        fn name(&self) -> &str {
            "namespace-echo"
        }

        fn get_string(&self, key: &ConfigKey, options: &[OpOption]) -> ConfigValue {
            ConfigValue::from(format!("{}/{}", namespace_of(options).unwrap_or("-"), key))
        }
    }

    #[test]
    fn test_get_str_delegates() {
        let source = NamespaceEcho;
        let value = source.get_str("foo", &[OpOption::namespace("ns")]);
        assert_eq!(value.as_str(), "ns/foo");
    }

    #[test]
    fn test_reference_and_box_are_sources() {
        let boxed: Box<dyn ConfigSource> = Box::new(NamespaceEcho);
        assert_eq!(boxed.name(), "namespace-echo");
        assert_eq!((&boxed).get_str("k", &[]).as_str(), "-/k");
    }

    #[test]
    fn test_config_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn ConfigSource>>();
    }
}
