// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record schemas.
//!
//! A [`Record`] describes its decodable fields into a [`Schema`]. Each entry is a
//! [`FieldDescriptor`] carrying the field name, its parsed tag, an optional
//! namespace override and a kind tag that decides how the walker treats it. Fields
//! a record does not describe are invisible to the decoder: they are never fetched
//! and never written.

use crate::decoder::registry::FormatRegistry;
use crate::decoder::resolver;
use crate::decoder::walker::Walker;
use crate::domain::options::OptionSet;
use crate::domain::tag::{parse_namespace, FieldTag};
use crate::domain::{ConfigValue, Result};
use serde::de::DeserializeOwned;
use std::fmt;

/// A type that can be populated by the decoder.
///
/// Nested records are decoded into a fresh `Default` value which then replaces the
/// field, so `Default` is required.
///
/// # Examples
///
/// ```
/// use tagcfg::decoder::{Record, Schema};
/// use tagcfg::Duration;
///
/// #[derive(Default)]
/// struct ServerConfig {
///     host: String,
///     port: u16,
///     timeout: Duration,
/// }
///
/// impl Record for ServerConfig {
///     fn describe(schema: &mut Schema<Self>) {
///         schema.string("host", "server.host", |c| &mut c.host);
///         schema.value("port", "server.port", |c| &mut c.port);
///         schema.value("timeout", "server.timeout", |c| &mut c.timeout);
///     }
/// }
///
/// assert_eq!(Schema::<ServerConfig>::of().len(), 3);
/// ```
pub trait Record: Default + 'static {
    /// Registers the record's fields, in declaration order.
    fn describe(schema: &mut Schema<Self>);
}

/// How the walker treats a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// Assigned the raw fetched string, no codec involved.
    String,
    /// Walked recursively as a nested record.
    Record,
    /// Decoded from the fetched string by a format unmarshaler.
    Other,
}

/// Per-leaf context handed to typed decoders.
pub(crate) struct Leaf<'a> {
    pub(crate) key: &'a str,
    pub(crate) format: Option<&'a str>,
    pub(crate) registry: &'a FormatRegistry,
}

type AssignString<R> = Box<dyn Fn(&mut R, ConfigValue)>;
type DecodeRecord<R> = Box<dyn Fn(&mut R, &Walker<'_>, &OptionSet) -> Result<()>>;
type DecodeValue<R> = Box<dyn Fn(&mut R, &ConfigValue, &Leaf<'_>) -> Result<()>>;

/// A field resolved from a single fetched value.
pub(crate) enum LeafKind<R> {
    String(AssignString<R>),
    Value(DecodeValue<R>),
}

pub(crate) enum FieldKind<R> {
    Leaf(LeafKind<R>),
    Record(DecodeRecord<R>),
}

impl<R> FieldKind<R> {
    fn kind(&self) -> Kind {
        match self {
            FieldKind::Leaf(LeafKind::String(_)) => Kind::String,
            FieldKind::Leaf(LeafKind::Value(_)) => Kind::Other,
            FieldKind::Record(_) => Kind::Record,
        }
    }
}

/// Describes one decodable field of a record.
pub struct FieldDescriptor<R> {
    name: &'static str,
    tag: FieldTag,
    namespace: Option<String>,
    kind: FieldKind<R>,
}

impl<R> FieldDescriptor<R> {
    /// Sets the namespace override for this field.
    ///
    /// For a nested record the namespace scopes every descendant leaf. An empty
    /// string clears the override.
    pub fn namespace(&mut self, raw: &str) -> &mut Self {
        self.namespace = parse_namespace(raw);
        self
    }

    /// Returns the field name used in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the parsed tag.
    pub fn tag(&self) -> &FieldTag {
        &self.tag
    }

    /// Returns the namespace override, if any.
    pub fn namespace_override(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the kind tag.
    pub fn kind(&self) -> Kind {
        self.kind.kind()
    }

    pub(crate) fn field_kind(&self) -> &FieldKind<R> {
        &self.kind
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("namespace", &self.namespace)
            .field("kind", &self.kind())
            .finish()
    }
}

/// The ordered list of field descriptors of a record type.
pub struct Schema<R> {
    fields: Vec<FieldDescriptor<R>>,
}

impl<R: Record> Schema<R> {
    /// Builds the schema of `R` by running its [`Record::describe`].
    pub fn of() -> Self {
        let mut schema = Schema { fields: Vec::new() };
        R::describe(&mut schema);
        schema
    }

    /// Registers a string-kind field.
    ///
    /// Any type constructible from a `String` qualifies, so newtypes over
    /// `String` are assigned directly as well.
    pub fn string<T>(
        &mut self,
        name: &'static str,
        tag: &str,
        access: fn(&mut R) -> &mut T,
    ) -> &mut FieldDescriptor<R>
    where
        T: From<String> + 'static,
    {
        let assign: AssignString<R> = Box::new(move |record: &mut R, raw: ConfigValue| {
            *access(record) = T::from(raw.into_string());
        });
        self.push(name, FieldTag::parse(tag), FieldKind::Leaf(LeafKind::String(assign)))
    }

    /// Registers a field decoded by a format unmarshaler.
    ///
    /// The tag's format name selects the unmarshaler; without one, or when the
    /// name is not registered, the default YAML decoder is used.
    ///
    /// Register `String` fields and string newtypes with [`Schema::string`]
    /// instead: through `value` the raw text is parsed as a document, so a value
    /// such as `{}` or `123: x` is rejected or reshaped rather than kept verbatim.
    pub fn value<T>(
        &mut self,
        name: &'static str,
        tag: &str,
        access: fn(&mut R) -> &mut T,
    ) -> &mut FieldDescriptor<R>
    where
        T: DeserializeOwned + 'static,
    {
        let decode: DecodeValue<R> =
            Box::new(move |record: &mut R, raw: &ConfigValue, leaf: &Leaf<'_>| {
                let value: T = resolver::unmarshal(raw, leaf.key, leaf.format, leaf.registry)?;
                *access(record) = value;
                Ok(())
            });
        self.push(name, FieldTag::parse(tag), FieldKind::Leaf(LeafKind::Value(decode)))
    }

    /// Registers a nested record.
    ///
    /// The field has no key of its own; its fields are fetched with the options
    /// inherited from this record plus the nested field's namespace, if set.
    pub fn nested<S>(
        &mut self,
        name: &'static str,
        access: fn(&mut R) -> &mut S,
    ) -> &mut FieldDescriptor<R>
    where
        S: Record,
    {
        let decode: DecodeRecord<R> = Box::new(
            move |record: &mut R, walker: &Walker<'_>, options: &OptionSet| {
                let mut nested = S::default();
                walker.walk(&mut nested, options)?;
                *access(record) = nested;
                Ok(())
            },
        );
        self.push(name, FieldTag::nested(), FieldKind::Record(decode))
    }

    fn push(&mut self, name: &'static str, tag: FieldTag, kind: FieldKind<R>) -> &mut FieldDescriptor<R> {
        let index = self.fields.len();
        self.fields.push(FieldDescriptor {
            name,
            tag,
            namespace: None,
            kind,
        });
        &mut self.fields[index]
    }
}

impl<R> Schema<R> {
    /// Returns the field descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor<R>] {
        &self.fields
    }

    /// Returns the number of described fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record describes no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}
