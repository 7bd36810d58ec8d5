// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default decoder implementation.
//!
//! This module provides the [`Decoder`], which binds a per-key option table and a
//! format registry, and the [`decode`] convenience function that uses the
//! process-wide registry.

use crate::decoder::registry::{global_snapshot, FormatRegistry};
use crate::decoder::schema::Record;
use crate::decoder::walker::Walker;
use crate::domain::options::{KeyOptions, OpOption, OptionSet};
use crate::domain::Result;
use crate::ports::ConfigSource;

/// Populates records from a configuration source.
///
/// A decoder is reusable: it holds no per-decode state, so the same value can
/// decode any number of records from any number of sources.
///
/// # Examples
///
/// ```rust
/// use tagcfg::adapters::MemorySource;
/// use tagcfg::decoder::{Decoder, Record, Schema};
///
/// #[derive(Default)]
/// struct App {
///     name: String,
///     workers: u8,
/// }
///
/// impl Record for App {
///     fn describe(schema: &mut Schema<Self>) {
///         schema.string("Name", "app.name", |c| &mut c.name);
///         schema.value("Workers", "app.workers", |c| &mut c.workers);
///     }
/// }
///
/// # fn main() -> tagcfg::domain::Result<()> {
/// let source = MemorySource::new()
///     .with_value("app.name", "demo")
///     .with_value("app.workers", "4");
///
/// let decoder = Decoder::builder().build()?;
/// let mut app = App::default();
/// decoder.decode(&mut app, &source)?;
///
/// assert_eq!(app.name, "demo");
/// assert_eq!(app.workers, 4);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Decoder {
    /// Options forwarded with every fetch of a given key
    key_options: KeyOptions,
    /// Format unmarshalers used by this decoder
    registry: FormatRegistry,
}

impl Decoder {
    /// Creates a decoder with no per-key options over a snapshot of the
    /// process-wide registry.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Creates a new decoder builder.
    pub fn builder() -> DecoderBuilder {
        DecoderBuilder::new()
    }

    /// Returns the per-key option table.
    pub fn key_options(&self) -> &KeyOptions {
        &self.key_options
    }

    /// Returns the format registry.
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Decodes every described field of `target` from `source`.
    ///
    /// Fields are fetched depth-first in declaration order, one fetch per leaf.
    /// The first failure aborts the decode; fields assigned before it keep their
    /// new values.
    pub fn decode<T: Record>(&self, target: &mut T, source: &dyn ConfigSource) -> Result<()> {
        tracing::debug!(
            "Decoding '{}' from source '{}'",
            std::any::type_name::<T>(),
            source.name()
        );

        let walker = Walker::new(source, &self.key_options, &self.registry);
        walker.walk(target, &OptionSet::new())
    }
}

/// Builder for constructing a [`Decoder`].
///
/// # Examples
///
/// ```rust
/// use tagcfg::decoder::{Decoder, FormatRegistry};
/// use tagcfg::domain::OpOption;
///
/// # fn main() -> tagcfg::domain::Result<()> {
/// let decoder = Decoder::builder()
///     .with_key_option("feature.flags", OpOption::namespace("features"))
///     .with_registry(FormatRegistry::with_builtins())
///     .build()?;
///
/// assert_eq!(decoder.key_options()["feature.flags"].len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DecoderBuilder {
    key_options: KeyOptions,
    registry: Option<FormatRegistry>,
}

impl DecoderBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the per-key option table.
    pub fn with_key_options(mut self, key_options: KeyOptions) -> Self {
        self.key_options = key_options;
        self
    }

    /// Appends an option forwarded with every fetch of `key`.
    pub fn with_key_option(mut self, key: impl Into<String>, option: OpOption) -> Self {
        self.key_options.entry(key.into()).or_default().push(option);
        self
    }

    /// Uses `registry` instead of the process-wide one.
    pub fn with_registry(mut self, registry: FormatRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Builds the decoder.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::RegistryError` if no registry was supplied and the
    /// process-wide registry cannot be read.
    pub fn build(self) -> Result<Decoder> {
        let registry = match self.registry {
            Some(registry) => registry,
            None => global_snapshot()?,
        };

        Ok(Decoder {
            key_options: self.key_options,
            registry,
        })
    }
}

/// Decodes `target` from `source` using the process-wide format registry.
///
/// `key_options` maps source keys to options forwarded with their fetch.
///
/// # Examples
///
/// ```rust
/// use tagcfg::adapters::MemorySource;
/// use tagcfg::decoder::{decode, Record, Schema};
/// use tagcfg::domain::KeyOptions;
///
/// #[derive(Default)]
/// struct Flags {
///     enabled: bool,
/// }
///
/// impl Record for Flags {
///     fn describe(schema: &mut Schema<Self>) {
///         schema.value("Enabled", "enabled", |c| &mut c.enabled);
///     }
/// }
///
/// let source = MemorySource::new().with_value("enabled", "true");
/// let mut flags = Flags::default();
/// decode(&mut flags, &source, &KeyOptions::new()).unwrap();
/// assert!(flags.enabled);
/// ```
pub fn decode<T: Record>(
    target: &mut T,
    source: &dyn ConfigSource,
    key_options: &KeyOptions,
) -> Result<()> {
    let registry = global_snapshot()?;
    Walker::new(source, key_options, &registry).walk(target, &OptionSet::new())
}
