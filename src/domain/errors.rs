// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the decoding engine.
//!
//! Every error aborts the decode that produced it. Fields assigned before the
//! failing field keep their values, so a partially decoded record must be treated
//! as meaningless when an error is returned.

use thiserror::Error;

/// A boxed, thread-safe error returned by format unmarshalers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for decoding operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use tagcfg::domain::errors::ConfigError;
///
/// let error = ConfigError::RegistryError {
///     message: "lock poisoned".to_string(),
/// };
/// assert_eq!(error.to_string(), "Format registry error: lock poisoned");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Decoding a nested record failed.
    #[error("Decode {field} error: {source}")]
    NestedDecode {
        /// Name of the field holding the nested record
        field: String,
        /// The error raised inside the nested record
        source: Box<ConfigError>,
    },

    /// An explicitly requested format failed to unmarshal the fetched value.
    #[error("{format} unmarshal {key} error: {source}")]
    FormatUnmarshal {
        /// The format name taken from the field tag
        format: String,
        /// The key the value was fetched from
        key: String,
        /// The underlying codec error
        source: BoxError,
    },

    /// The default structured decoder failed to unmarshal the fetched value.
    #[error("unmarshal {value} for key '{key}' error: {source}")]
    DefaultUnmarshal {
        /// The key the value was fetched from
        key: String,
        /// The raw fetched value
        value: String,
        /// The underlying YAML error
        source: serde_yaml::Error,
    },

    /// The process-wide format registry could not be accessed.
    #[error("Format registry error: {message}")]
    RegistryError {
        /// The error message
        message: String,
    },
}

impl ConfigError {
    /// Wraps an error raised while decoding the nested record held by `field`.
    pub fn nested(field: impl Into<String>, err: ConfigError) -> Self {
        ConfigError::NestedDecode {
            field: field.into(),
            source: Box::new(err),
        }
    }

    /// Returns the innermost error, following nested-record wrappers.
    pub fn root_cause(&self) -> &ConfigError {
        match self {
            ConfigError::NestedDecode { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// A specialized Result type for decoding operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml_error() -> serde_yaml::Error {
        serde_yaml::from_str::<i32>("not a number").unwrap_err()
    }

    #[test]
    fn test_format_unmarshal_error() {
        let source = serde_json::from_str::<i32>("{").unwrap_err();
        let error = ConfigError::FormatUnmarshal {
            format: "json".to_string(),
            key: "user".to_string(),
            source: Box::new(source),
        };
        assert!(error.to_string().starts_with("json unmarshal user error: "));
    }

    #[test]
    fn test_default_unmarshal_error() {
        let error = ConfigError::DefaultUnmarshal {
            key: "port".to_string(),
            value: "not a number".to_string(),
            source: yaml_error(),
        };
        let message = error.to_string();
        assert!(message.contains("not a number"));
        assert!(message.contains("port"));
    }

    #[test]
    fn test_nested_error_wraps_field_name() {
        let inner = ConfigError::DefaultUnmarshal {
            key: "port".to_string(),
            value: "x".to_string(),
            source: yaml_error(),
        };
        let error = ConfigError::nested("Database", inner);
        assert!(error.to_string().starts_with("Decode Database error: "));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_root_cause_unwraps_nesting() {
        let inner = ConfigError::RegistryError {
            message: "boom".to_string(),
        };
        let error = ConfigError::nested("Outer", ConfigError::nested("Inner", inner));
        assert!(matches!(
            error.root_cause(),
            ConfigError::RegistryError { .. }
        ));
    }
}
