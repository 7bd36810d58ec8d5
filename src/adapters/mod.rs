// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing port implementations.
//!
//! This module contains concrete implementations of the traits defined in the
//! ports layer: configuration sources and the built-in format unmarshalers.

#[cfg(feature = "env")]
pub mod env_var;
pub mod formats;
pub mod memory;

// Re-export adapters based on feature flags
#[cfg(feature = "env")]
pub use env_var::EnvVarSource;
pub use memory::{Fetch, MemorySource, DEFAULT_NAMESPACE};
