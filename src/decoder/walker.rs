// SPDX-License-Identifier: MIT OR Apache-2.0

//! Depth-first record walker.
//!
//! The walker visits a record's fields in declaration order. Nested records are
//! recursed into with the composed options; every other field with a key triggers
//! exactly one fetch from the source and is handed to the value resolver.

use crate::decoder::registry::FormatRegistry;
use crate::decoder::resolver;
use crate::decoder::schema::{FieldDescriptor, FieldKind, Leaf, Record, Schema};
use crate::domain::options::{KeyOptions, OptionSet};
use crate::domain::{ConfigError, ConfigKey, Result};
use crate::ports::ConfigSource;

/// Walks records against a configuration source.
pub struct Walker<'a> {
    source: &'a dyn ConfigSource,
    key_options: &'a KeyOptions,
    registry: &'a FormatRegistry,
}

impl<'a> Walker<'a> {
    /// Creates a walker over the given source, per-key options and formats.
    pub fn new(
        source: &'a dyn ConfigSource,
        key_options: &'a KeyOptions,
        registry: &'a FormatRegistry,
    ) -> Self {
        Self {
            source,
            key_options,
            registry,
        }
    }

    /// Decodes every described field of `record`.
    ///
    /// `inherited` holds the options composed by the enclosing records. The first
    /// error aborts the walk; fields assigned before it are not rolled back.
    pub fn walk<R: Record>(&self, record: &mut R, inherited: &OptionSet) -> Result<()> {
        let schema = Schema::<R>::of();
        tracing::trace!(
            "Walking record '{}' ({} fields) from source '{}'",
            std::any::type_name::<R>(),
            schema.len(),
            self.source.name()
        );

        for field in schema.fields() {
            self.visit(record, field, inherited)?;
        }

        Ok(())
    }

    fn visit<R>(&self, record: &mut R, field: &FieldDescriptor<R>, inherited: &OptionSet) -> Result<()> {
        let tag = field.tag();
        let options = OptionSet::compose(
            inherited,
            tag.key(),
            self.key_options,
            field.namespace_override(),
        );

        let kind = match field.field_kind() {
            FieldKind::Record(decode) => {
                return decode(record, self, &options)
                    .map_err(|e| ConfigError::nested(field.name(), e));
            }
            FieldKind::Leaf(kind) => kind,
        };

        if tag.is_nested() {
            tracing::trace!("Skipping field '{}': leaf without a key", field.name());
            return Ok(());
        }

        let key = ConfigKey::from(tag.key());
        let raw = self.source.get_string(&key, options.as_slice());
        tracing::debug!(
            "Fetched key '{}' for field '{}' ({} bytes, namespace {:?})",
            key,
            field.name(),
            raw.as_str().len(),
            options.namespace()
        );

        let leaf = Leaf {
            key: tag.key(),
            format: tag.format(),
            registry: self.registry,
        };
        resolver::resolve(record, kind, raw, &leaf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemorySource;
    use crate::decoder::Schema;
    use crate::domain::options::OpOption;

    #[derive(Default)]
    struct Leafy {
        a: String,
        b: u32,
        skipped: String,
    }

    impl Record for Leafy {
        fn describe(schema: &mut Schema<Self>) {
            schema.string("A", "a", |c| &mut c.a);
            schema.value("B", "b", |c| &mut c.b);
            schema.string("Skipped", "", |c| &mut c.skipped);
        }
    }

    #[derive(Default)]
    struct Wrapper {
        leafy: Leafy,
    }

    impl Record for Wrapper {
        fn describe(schema: &mut Schema<Self>) {
            schema.nested("Leafy", |c| &mut c.leafy).namespace("inner");
        }
    }

    #[test]
    fn test_walk_fetches_in_declaration_order() {
        let source = MemorySource::new().with_value("a", "x").with_value("b", "7");
        let registry = FormatRegistry::with_builtins();
        let key_options = KeyOptions::new();
        let walker = Walker::new(&source, &key_options, &registry);

        let mut record = Leafy {
            skipped: "kept".to_string(),
            ..Leafy::default()
        };
        walker.walk(&mut record, &OptionSet::new()).unwrap();

        assert_eq!(record.a, "x");
        assert_eq!(record.b, 7);
        assert_eq!(record.skipped, "kept");

        let keys: Vec<String> = source.fetches().into_iter().map(|f| f.key.into_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_walk_nested_inherits_and_appends_namespace() {
        let source = MemorySource::new()
            .with_namespaced_value("inner", "a", "y")
            .with_namespaced_value("inner", "b", "1");
        let registry = FormatRegistry::with_builtins();
        let mut key_options = KeyOptions::new();
        key_options.insert("a".to_string(), vec![OpOption::custom("label", "v1")]);
        let walker = Walker::new(&source, &key_options, &registry);

        let inherited = OptionSet::from(vec![OpOption::namespace("outer")]);
        let mut record = Wrapper::default();
        walker.walk(&mut record, &inherited).unwrap();

        assert_eq!(record.leafy.a, "y");
        let fetches = source.fetches();
        assert_eq!(
            fetches[0].options,
            vec![
                OpOption::namespace("outer"),
                OpOption::namespace("inner"),
                OpOption::custom("label", "v1"),
            ]
        );
        assert_eq!(
            fetches[1].options,
            vec![OpOption::namespace("outer"), OpOption::namespace("inner")]
        );
    }

    #[test]
    fn test_walk_nested_error_names_field() {
        let source = MemorySource::new().with_namespaced_value("inner", "b", "not a number");
        let registry = FormatRegistry::with_builtins();
        let key_options = KeyOptions::new();
        let walker = Walker::new(&source, &key_options, &registry);

        let mut record = Wrapper::default();
        let err = walker.walk(&mut record, &OptionSet::new()).unwrap_err();
        assert!(matches!(err, ConfigError::NestedDecode { ref field, .. } if field == "Leafy"));
    }
}
