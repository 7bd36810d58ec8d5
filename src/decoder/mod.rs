// SPDX-License-Identifier: MIT OR Apache-2.0

//! The decoding engine.
//!
//! A [`Record`] describes its fields into a [`Schema`]; the [`Walker`] visits them
//! depth-first, composing source options per field, and the resolver turns each
//! fetched string into the field's type through the [`FormatRegistry`].

pub mod default_decoder;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod walker;

pub use default_decoder::{decode, Decoder, DecoderBuilder};
pub use registry::{set_unmarshal_func, FormatRegistry};
pub use schema::{FieldDescriptor, Kind, Record, Schema};
pub use walker::Walker;
