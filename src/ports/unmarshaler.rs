// SPDX-License-Identifier: MIT OR Apache-2.0

//! Format unmarshaler trait definition.
//!
//! An unmarshaler turns the raw bytes of a fetched value into the field's type.
//! The field type is only known to the decoder, so the unmarshaler receives a
//! [`Target`]: a type-erased slot it fills by handing over any
//! `serde::Deserializer`. A format therefore decodes into the field exactly as its
//! own `from_slice::<T>` would.

use crate::domain::errors::BoxError;
use serde::de::DeserializeOwned;

/// A slot for a value of some deserializable type.
trait Slot {
    fn fill<'de>(
        &mut self,
        deserializer: &mut dyn erased_serde::Deserializer<'de>,
    ) -> Result<(), erased_serde::Error>;
}

impl<T: DeserializeOwned> Slot for Option<T> {
    fn fill<'de>(
        &mut self,
        deserializer: &mut dyn erased_serde::Deserializer<'de>,
    ) -> Result<(), erased_serde::Error> {
        *self = Some(erased_serde::deserialize::<T>(deserializer)?);
        Ok(())
    }
}

/// The destination of one unmarshal call.
///
/// The last successful [`Target::deserialize`] wins. A target never filled makes
/// the decode fail.
///
/// # Examples
///
/// ```rust
/// use tagcfg::ports::unmarshaler::Target;
///
/// let mut slot: Option<Vec<u8>> = None;
/// let mut target = Target::new(&mut slot);
/// target.deserialize(serde_json::json!([1, 2])).unwrap();
/// assert_eq!(slot, Some(vec![1, 2]));
/// ```
pub struct Target<'t> {
    slot: &'t mut dyn Slot,
}

impl<'t> Target<'t> {
    /// Creates a target writing into `slot`.
    pub fn new<T>(slot: &'t mut Option<T>) -> Self
    where
        T: DeserializeOwned + 't,
    {
        Target { slot }
    }

    /// Deserializes the target's type from `deserializer`.
    ///
    /// Any serde data format works, including an in-memory document such as a
    /// `serde_json::Value`.
    pub fn deserialize<'de, D>(&mut self, deserializer: D) -> Result<(), BoxError>
    where
        D: serde::Deserializer<'de>,
    {
        let mut erased = <dyn erased_serde::Deserializer<'de>>::erase(deserializer);
        self.slot
            .fill(&mut erased)
            .map_err(|e| BoxError::from(e.to_string()))
    }
}

/// A trait for format unmarshalers.
///
/// Plain functions and closures with the signature
/// `Fn(&[u8], &mut Target<'_>) -> Result<(), BoxError>` implement it automatically.
///
/// # Examples
///
/// ```rust
/// use tagcfg::ports::unmarshaler::{Target, Unmarshaler};
/// use tagcfg::domain::errors::BoxError;
///
/// struct Lines;
///
/// impl Unmarshaler for Lines {
///     fn unmarshal(&self, bytes: &[u8], target: &mut Target<'_>) -> Result<(), BoxError> {
///         let text = std::str::from_utf8(bytes)?;
///         target.deserialize(serde_json::Value::from(text.lines().collect::<Vec<_>>()))
///     }
/// }
///
/// let mut lines: Option<Vec<String>> = None;
/// Lines.unmarshal(b"a\nb", &mut Target::new(&mut lines)).unwrap();
/// assert_eq!(lines, Some(vec!["a".to_string(), "b".to_string()]));
/// ```
pub trait Unmarshaler: Send + Sync {
    /// Parses raw bytes into `target`.
    fn unmarshal(&self, bytes: &[u8], target: &mut Target<'_>) -> Result<(), BoxError>;
}

impl<F> Unmarshaler for F
where
    F: Fn(&[u8], &mut Target<'_>) -> Result<(), BoxError> + Send + Sync,
{
    fn unmarshal(&self, bytes: &[u8], target: &mut Target<'_>) -> Result<(), BoxError> {
        self(bytes, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn empty_object(_: &[u8], target: &mut Target<'_>) -> Result<(), BoxError> {
        target.deserialize(Value::Object(Default::default()))
    }

    #[test]
    fn test_fn_is_unmarshaler() {
        let unmarshaler: &dyn Unmarshaler = &empty_object;
        let mut slot: Option<std::collections::HashMap<String, u8>> = None;
        unmarshaler.unmarshal(b"anything", &mut Target::new(&mut slot)).unwrap();
        assert_eq!(slot.map(|m| m.len()), Some(0));
    }

    #[test]
    fn test_closure_is_unmarshaler() {
        let upper = |bytes: &[u8], target: &mut Target<'_>| -> Result<(), BoxError> {
            target.deserialize(Value::from(String::from_utf8(bytes.to_ascii_uppercase())?))
        };
        let mut slot: Option<String> = None;
        upper.unmarshal(b"abc", &mut Target::new(&mut slot)).unwrap();
        assert_eq!(slot.as_deref(), Some("ABC"));
    }

    #[test]
    fn test_target_takes_format_deserializer() {
        let mut slot: Option<String> = None;
        let mut target = Target::new(&mut slot);
        target
            .deserialize(serde_yaml::Deserializer::from_slice(b"123"))
            .unwrap();
        assert_eq!(slot.as_deref(), Some("123"));
    }

    #[test]
    fn test_target_type_mismatch() {
        let mut slot: Option<u8> = None;
        let err = Target::new(&mut slot)
            .deserialize(Value::from("nope"))
            .unwrap_err();
        assert!(err.to_string().contains("invalid type"));
        assert!(slot.is_none());
    }

    #[test]
    fn test_unmarshaler_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Unmarshaler>();
    }
}
