// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field tag parsing.
//!
//! A field tag has the form `key` or `key,format`. The key is handed to the
//! configuration source verbatim; the optional format selects an unmarshaler from
//! the format registry. An empty key marks a field that is itself a record to
//! recurse into.

/// Delimiter between the key and the format name.
const TAG_DELIMITER: char = ',';

/// A parsed field tag.
///
/// # Examples
///
/// ```
/// use tagcfg::domain::tag::FieldTag;
///
/// let tag = FieldTag::parse("user,json");
/// assert_eq!(tag.key(), "user");
/// assert_eq!(tag.format(), Some("json"));
///
/// let tag = FieldTag::parse("");
/// assert!(tag.is_nested());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldTag {
    key: String,
    format: Option<String>,
}

impl FieldTag {
    /// Parses a raw tag string.
    ///
    /// Anything after a second delimiter is ignored. An empty format part
    /// (`"key,"`) is treated as no format.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split(TAG_DELIMITER);
        let key = parts.next().unwrap_or_default().to_string();
        let format = parts
            .next()
            .filter(|format| !format.is_empty())
            .map(str::to_string);

        FieldTag { key, format }
    }

    /// The tag used by nested records: no key, no format.
    pub fn nested() -> Self {
        FieldTag::default()
    }

    /// Returns the source key, possibly empty.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the explicit format name, if any.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Returns `true` if the key is empty.
    pub fn is_nested(&self) -> bool {
        self.key.is_empty()
    }
}

/// Extracts the namespace override from its raw annotation.
///
/// # Examples
///
/// ```
/// use tagcfg::domain::tag::parse_namespace;
///
/// assert_eq!(parse_namespace("ns"), Some("ns".to_string()));
/// assert_eq!(parse_namespace(""), None);
/// ```
pub fn parse_namespace(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}
