// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source options and their composition across nesting levels.
//!
//! Options are passed to [`ConfigSource::get_string`](crate::ports::ConfigSource::get_string)
//! alongside the key. The decoder only ever creates namespace options; everything
//! else comes from the caller's per-key table and is forwarded untouched.

use std::collections::HashMap;

/// A single option understood by a configuration source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OpOption {
    /// Look the key up in the given namespace.
    Namespace(String),
    /// A backend-specific option, forwarded verbatim.
    Custom {
        /// Option name
        name: String,
        /// Option value
        value: String,
    },
}

impl OpOption {
    /// Creates a namespace option.
    pub fn namespace(namespace: impl Into<String>) -> Self {
        OpOption::Namespace(namespace.into())
    }

    /// Creates a backend-specific option.
    pub fn custom(name: impl Into<String>, value: impl Into<String>) -> Self {
        OpOption::Custom {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Returns the last namespace in `options`, if any.
///
/// Sources use this to honor the nearest enclosing namespace override.
pub fn namespace_of(options: &[OpOption]) -> Option<&str> {
    options.iter().rev().find_map(|option| match option {
        OpOption::Namespace(ns) => Some(ns.as_str()),
        _ => None,
    })
}

/// Per-key options supplied by the caller, keyed by the source key.
pub type KeyOptions = HashMap<String, Vec<OpOption>>;

/// An ordered sequence of options.
///
/// Order matters: sources resolve conflicting options with "last wins", and the
/// decoder always places a field's own namespace last.
///
/// # Examples
///
/// ```
/// use tagcfg::domain::options::{KeyOptions, OpOption, OptionSet};
///
/// let inherited = OptionSet::from(vec![OpOption::namespace("outer")]);
/// let effective = OptionSet::compose(&inherited, "foo", &KeyOptions::new(), Some("inner"));
/// assert_eq!(effective.namespace(), Some("inner"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionSet(Vec<OpOption>);

impl OptionSet {
    /// Creates an empty option set.
    pub fn new() -> Self {
        OptionSet(Vec::new())
    }

    /// Computes the effective options for a field.
    ///
    /// The result is `inherited ++ key_options[key] ++ [Namespace(namespace)]`,
    /// the namespace part only when `namespace` is present and non-empty. A key
    /// missing from `key_options` contributes nothing.
    pub fn compose(
        inherited: &OptionSet,
        key: &str,
        key_options: &KeyOptions,
        namespace: Option<&str>,
    ) -> OptionSet {
        let per_key = key_options.get(key).map(Vec::as_slice).unwrap_or_default();

        let mut options = Vec::with_capacity(inherited.len() + per_key.len() + 1);
        options.extend_from_slice(&inherited.0);
        options.extend_from_slice(per_key);

        if let Some(ns) = namespace.filter(|ns| !ns.is_empty()) {
            options.push(OpOption::namespace(ns));
        }

        OptionSet(options)
    }

    /// Returns the namespace in effect, the last namespace option wins.
    pub fn namespace(&self) -> Option<&str> {
        namespace_of(&self.0)
    }

    /// Returns the options as a slice, in order.
    pub fn as_slice(&self) -> &[OpOption] {
        &self.0
    }

    /// Returns the number of options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no options.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<OpOption>> for OptionSet {
    fn from(options: Vec<OpOption>) -> Self {
        OptionSet(options)
    }
}

impl AsRef<[OpOption]> for OptionSet {
    fn as_ref(&self) -> &[OpOption] {
        &self.0
    }
}
