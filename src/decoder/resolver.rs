// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value resolution for leaf fields.
//!
//! Decision order, first match wins:
//!
//! 1. string-kind fields take the raw value as is;
//! 2. a format named in the tag and present in the registry decodes the value;
//! 3. everything else goes through the default YAML decoder, which also covers
//!    numbers, booleans, durations and sequences.
//!
//! A format name missing from the registry is not an error: it falls through to
//! the default decoder.

use crate::decoder::registry::FormatRegistry;
use crate::decoder::schema::{Leaf, LeafKind};
use crate::domain::errors::BoxError;
use crate::domain::{ConfigError, ConfigValue, Result};
use crate::ports::unmarshaler::{Target, Unmarshaler};
use serde::de::DeserializeOwned;

pub(crate) fn resolve<R>(
    record: &mut R,
    kind: &LeafKind<R>,
    raw: ConfigValue,
    leaf: &Leaf<'_>,
) -> Result<()> {
    match kind {
        LeafKind::String(assign) => {
            assign(record, raw);
            Ok(())
        }
        LeafKind::Value(decode) => decode(record, &raw, leaf),
    }
}

/// Decodes a raw value into `T`.
///
/// `format` is the optional format name from the field tag. A registered format
/// short-circuits on success; an unknown one falls back to the default decoder.
///
/// # Examples
///
/// ```
/// use tagcfg::decoder::{resolver, FormatRegistry};
/// use tagcfg::domain::ConfigValue;
///
/// let registry = FormatRegistry::with_builtins();
/// let raw = ConfigValue::from("[1, 2, 3]");
///
/// let values: Vec<u8> = resolver::unmarshal(&raw, "numbers", Some("json"), &registry).unwrap();
/// assert_eq!(values, vec![1, 2, 3]);
///
/// let values: Vec<u8> = resolver::unmarshal(&raw, "numbers", Some("nope"), &registry).unwrap();
/// assert_eq!(values, vec![1, 2, 3]);
/// ```
pub fn unmarshal<T>(
    raw: &ConfigValue,
    key: &str,
    format: Option<&str>,
    registry: &FormatRegistry,
) -> Result<T>
where
    T: DeserializeOwned,
{
    if let Some(name) = format {
        match registry.get(name) {
            Some(unmarshaler) => return unmarshal_with(name, &**unmarshaler, raw, key),
            None => tracing::debug!(
                "Format '{}' for key '{}' is not registered, using the default decoder",
                name,
                key
            ),
        }
    }

    unmarshal_default(raw, key)
}

fn unmarshal_with<T>(
    format: &str,
    unmarshaler: &dyn Unmarshaler,
    raw: &ConfigValue,
    key: &str,
) -> Result<T>
where
    T: DeserializeOwned,
{
    let wrap = |source: BoxError| ConfigError::FormatUnmarshal {
        format: format.to_string(),
        key: key.to_string(),
        source,
    };

    let mut slot: Option<T> = None;
    unmarshaler
        .unmarshal(raw.as_bytes(), &mut Target::new(&mut slot))
        .map_err(wrap)?;
    slot.ok_or_else(|| wrap(BoxError::from("unmarshaler produced no value")))
}

fn unmarshal_default<T>(raw: &ConfigValue, key: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_yaml::from_slice(raw.as_bytes()).map_err(|source| ConfigError::DefaultUnmarshal {
        key: key.to_string(),
        value: raw.as_str().to_string(),
        source,
    })
}
