// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! This module contains the types shared by every other layer: keys and raw
//! values, tags, options, durations and errors. It has no knowledge of sources
//! or formats.

pub mod config_key;
pub mod config_value;
pub mod duration;
pub mod errors;
pub mod options;
pub mod tag;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use duration::Duration;
pub use errors::{ConfigError, Result};
pub use options::{KeyOptions, OpOption, OptionSet};
pub use tag::FieldTag;
