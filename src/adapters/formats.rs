// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in format unmarshalers.
//!
//! Both feed their own serde deserializer to the target, so `key,yaml` decodes a
//! value the same way the default decoder does.

use crate::domain::errors::BoxError;
use crate::ports::unmarshaler::Target;

/// Parses a YAML document into the target.
///
/// # Examples
///
/// ```
/// use tagcfg::adapters::formats;
/// use tagcfg::ports::unmarshaler::Target;
///
/// let mut age: Option<f64> = None;
/// formats::yaml(b".inf", &mut Target::new(&mut age)).unwrap();
/// assert_eq!(age, Some(f64::INFINITY));
/// ```
pub fn yaml(bytes: &[u8], target: &mut Target<'_>) -> Result<(), BoxError> {
    target.deserialize(serde_yaml::Deserializer::from_slice(bytes))
}

/// Parses a JSON document into the target.
///
/// Trailing characters after the document are rejected.
///
/// # Examples
///
/// ```
/// use tagcfg::adapters::formats;
/// use tagcfg::ports::unmarshaler::Target;
///
/// let mut names: Option<Vec<String>> = None;
/// formats::json(br#"["Alice"]"#, &mut Target::new(&mut names)).unwrap();
/// assert_eq!(names, Some(vec!["Alice".to_string()]));
/// ```
#[cfg(feature = "json")]
pub fn json(bytes: &[u8], target: &mut Target<'_>) -> Result<(), BoxError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    target.deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        name: String,
        age: u8,
    }

    fn into<T: serde::de::DeserializeOwned>(
        format: fn(&[u8], &mut Target<'_>) -> Result<(), BoxError>,
        bytes: &[u8],
    ) -> Result<T, BoxError> {
        let mut slot = None;
        format(bytes, &mut Target::new(&mut slot))?;
        slot.ok_or_else(|| BoxError::from("target not filled"))
    }

    #[test]
    fn test_yaml_sequence() {
        let users: Vec<User> = into(yaml, b"- name: Alice\n  age: 18").unwrap();
        assert_eq!(users, vec![User { name: "Alice".to_string(), age: 18 }]);
    }

    #[test]
    fn test_yaml_scalar_into_string() {
        let text: String = into(yaml, b"123").unwrap();
        assert_eq!(text, "123");
        let map: BTreeMap<String, String> = into(yaml, b"name: 123").unwrap();
        assert_eq!(map["name"], "123");
    }

    #[test]
    fn test_yaml_invalid() {
        assert!(into::<Vec<u8>>(yaml, b"a: [1, 2").is_err());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_object() {
        let user: User = into(json, br#"{"name":"Alice","age":18}"#).unwrap();
        assert_eq!(user, User { name: "Alice".to_string(), age: 18 });
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_rejects_yaml_and_trailing_input() {
        assert!(into::<User>(json, b"name: Alice").is_err());
        assert!(into::<Vec<u8>>(json, b"[1] [2]").is_err());
    }
}
