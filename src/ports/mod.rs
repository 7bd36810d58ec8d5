// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) through which the decoder
//! talks to the outside world: configuration sources and format unmarshalers.
//! Adapters in the adapters layer implement them.

pub mod source;
pub mod unmarshaler;

// Re-export commonly used types
pub use source::ConfigSource;
pub use unmarshaler::{Target, Unmarshaler};
