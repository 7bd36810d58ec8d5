// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tag-driven decoding of key-value configuration into typed records.
//!
//! This crate populates typed, possibly nested, records from a configuration
//! source such as a remote configuration center. Each field carries a tag that
//! names the source key, an optional format and an optional namespace override.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`ConfigKey`, `ConfigValue`, `FieldTag`, `OpOption`,
//!   `Duration`, errors)
//! - **Ports**: Trait definitions that define interfaces (`ConfigSource`, `Unmarshaler`)
//! - **Adapters**: Source implementations (in-memory, env vars) and built-in formats
//! - **Decoder**: Record schemas, the depth-first walker and the value resolver
//!
//! # Decoding rules
//!
//! - String fields receive the fetched string as is.
//! - A field tagged `key,format` is decoded by the named format when it is registered.
//! - Every other field goes through the default YAML decoder, which also handles
//!   numbers, booleans, sequences and [`Duration`] strings such as `"1m"`.
//! - Nested records have no key of their own; their namespace, if set, scopes every
//!   field below them.
//!
//! # Feature Flags
//!
//! - `json`: Register the `json` format in the built-in registry (default)
//! - `env`: Enable the environment variable source (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use tagcfg::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize, PartialEq)]
//! struct User {
//!     name: String,
//!     age: u8,
//! }
//!
//! #[derive(Default)]
//! struct Database {
//!     url: String,
//! }
//!
//! impl Record for Database {
//!     fn describe(schema: &mut Schema<Self>) {
//!         schema.string("Url", "url", |c| &mut c.url);
//!     }
//! }
//!
//! #[derive(Default)]
//! struct AppConfig {
//!     owner: User,
//!     timeout: Duration,
//!     database: Database,
//! }
//!
//! impl Record for AppConfig {
//!     fn describe(schema: &mut Schema<Self>) {
//!         schema.value("Owner", "owner,json", |c| &mut c.owner);
//!         schema.value("Timeout", "timeout", |c| &mut c.timeout);
//!         schema.nested("Database", |c| &mut c.database).namespace("db");
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let source = MemorySource::new()
//!     .with_value("owner", r#"{"name":"Alice","age":18}"#)
//!     .with_value("timeout", "1m")
//!     .with_namespaced_value("db", "url", "postgres://localhost/app");
//!
//! let mut config = AppConfig::default();
//! decode(&mut config, &source, &KeyOptions::new())?;
//!
//! assert_eq!(config.owner, User { name: "Alice".to_string(), age: 18 });
//! assert_eq!(config.timeout.as_secs(), 60);
//! assert_eq!(config.database.url, "postgres://localhost/app");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod decoder;
pub mod domain;
pub mod ports;

pub use decoder::{decode, Record, Schema};
pub use domain::Duration;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::MemorySource;
    pub use crate::decoder::{decode, Decoder, FormatRegistry, Record, Schema};
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigValue, Duration, KeyOptions, OpOption, Result,
    };
    pub use crate::ports::{ConfigSource, Target, Unmarshaler};

    // Re-export adapters based on feature flags
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvVarSource;
}
