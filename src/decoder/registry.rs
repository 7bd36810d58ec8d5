// SPDX-License-Identifier: MIT OR Apache-2.0

//! Format registry.
//!
//! Maps format names, as written after the comma in a field tag, to unmarshalers.
//! A registry can be built and passed to a [`Decoder`](crate::decoder::Decoder)
//! explicitly; otherwise the process-wide registry is used. Registration on the
//! process-wide registry is meant to happen during initialization: every decode
//! works on a snapshot taken when it starts.

use crate::adapters::formats;
use crate::domain::{ConfigError, Result};
use crate::ports::Unmarshaler;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// A shared unmarshaler as stored in the registry.
pub type UnmarshalFunc = Arc<dyn Unmarshaler>;

static GLOBAL_REGISTRY: Lazy<RwLock<FormatRegistry>> =
    Lazy::new(|| RwLock::new(FormatRegistry::with_builtins()));

/// A set of named format unmarshalers.
///
/// Cloning is cheap: entries are reference counted.
///
/// # Examples
///
/// ```
/// use tagcfg::decoder::FormatRegistry;
///
/// let registry = FormatRegistry::with_builtins();
/// assert!(registry.contains("yaml"));
/// ```
#[derive(Clone, Default)]
pub struct FormatRegistry {
    formats: HashMap<String, UnmarshalFunc>,
}

impl FormatRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in formats.
    ///
    /// `yaml` is always present; `json` is present with the `json` feature.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("yaml", formats::yaml);
        #[cfg(feature = "json")]
        registry.register("json", formats::json);
        registry
    }

    /// Registers an unmarshaler under `name`, replacing any previous entry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        unmarshaler: impl Unmarshaler + 'static,
    ) -> &mut Self {
        let name = name.into();
        if self.formats.insert(name.clone(), Arc::new(unmarshaler)).is_some() {
            tracing::debug!("Replaced unmarshaler for format '{}'", name);
        }
        self
    }

    /// Returns the unmarshaler registered under `name`.
    pub fn get(&self, name: &str) -> Option<&UnmarshalFunc> {
        self.formats.get(name)
    }

    /// Returns `true` if a format is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Returns the registered format names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formats.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.names())
            .finish()
    }
}

/// Registers an unmarshaler on the process-wide registry.
///
/// The last registration for a name wins. Decodes already in progress keep the
/// snapshot they started with.
///
/// # Examples
///
/// ```
/// use tagcfg::decoder::registry::{global_snapshot, set_unmarshal_func};
/// use tagcfg::domain::errors::BoxError;
/// use tagcfg::ports::unmarshaler::Target;
///
/// set_unmarshal_func("text", |bytes: &[u8], target: &mut Target<'_>| -> Result<(), BoxError> {
///     target.deserialize(serde_json::Value::from(String::from_utf8(bytes.to_vec())?))
/// })
/// .unwrap();
///
/// assert!(global_snapshot().unwrap().contains("text"));
/// ```
pub fn set_unmarshal_func(
    name: impl Into<String>,
    unmarshaler: impl Unmarshaler + 'static,
) -> Result<()> {
    let mut registry = GLOBAL_REGISTRY
        .write()
        .map_err(|_| ConfigError::RegistryError {
            message: "process-wide format registry lock is poisoned".to_string(),
        })?;
    registry.register(name, unmarshaler);
    Ok(())
}

/// Returns a copy of the process-wide registry.
pub fn global_snapshot() -> Result<FormatRegistry> {
    GLOBAL_REGISTRY
        .read()
        .map(|registry| registry.clone())
        .map_err(|_| ConfigError::RegistryError {
            message: "process-wide format registry lock is poisoned".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::BoxError;
    use crate::ports::unmarshaler::Target;

    fn null(_: &[u8], target: &mut Target<'_>) -> std::result::Result<(), BoxError> {
        target.deserialize(serde_json::Value::Null)
    }

    #[test]
    fn test_builtins() {
        let registry = FormatRegistry::with_builtins();
        assert!(registry.contains("yaml"));
        #[cfg(feature = "json")]
        assert_eq!(registry.names(), vec!["json", "yaml"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = FormatRegistry::new();
        assert!(registry.get("yaml").is_none());
        assert!(registry.names().is_empty());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = FormatRegistry::with_builtins();
        registry.register("yaml", null);

        let mut slot: Option<Option<u8>> = None;
        registry
            .get("yaml")
            .unwrap()
            .unmarshal(b"1", &mut Target::new(&mut slot))
            .unwrap();
        assert_eq!(slot, Some(None));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = FormatRegistry::with_builtins();
        let mut copy = original.clone();
        copy.register("null", null);
        assert!(copy.contains("null"));
        assert!(!original.contains("null"));
    }

    #[test]
    fn test_global_registration() {
        set_unmarshal_func("registry-test-null", null).unwrap();
        let snapshot = global_snapshot().unwrap();
        assert!(snapshot.contains("registry-test-null"));
        assert!(snapshot.contains("yaml"));
    }

    #[test]
    fn test_debug_lists_names() {
        let registry = FormatRegistry::new();
        assert_eq!(format!("{:?}", registry), "FormatRegistry { formats: [] }");
    }
}
