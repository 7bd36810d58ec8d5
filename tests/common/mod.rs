// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for the integration tests.

use serde::Deserialize;
use tagcfg::adapters::MemorySource;
use tagcfg::decoder::{Decoder, FormatRegistry};
use tagcfg::domain::KeyOptions;

/// A structured value decoded through a format.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct User {
    pub name: String,
    pub age: u8,
}

impl User {
    #[allow(dead_code)]
    pub fn new(name: &str, age: u8) -> Self {
        User {
            name: name.to_string(),
            age,
        }
    }
}

/// Installs a test-friendly subscriber once; later calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Builds a decoder over the built-in formats, isolated from the process-wide registry.
#[allow(dead_code)]
pub fn builtin_decoder(key_options: KeyOptions) -> Decoder {
    Decoder::builder()
        .with_key_options(key_options)
        .with_registry(FormatRegistry::with_builtins())
        .build()
        .expect("an explicit registry never fails to build")
}

/// Returns the keys fetched from `source`, in order.
#[allow(dead_code)]
pub fn fetched_keys(source: &MemorySource) -> Vec<String> {
    source
        .fetches()
        .into_iter()
        .map(|fetch| fetch.key.into_string())
        .collect()
}
