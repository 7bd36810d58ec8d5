// SPDX-License-Identifier: MIT OR Apache-2.0

//! Custom format example for the tagcfg crate.
//!
//! This example demonstrates:
//! - Registering a format on the process-wide registry
//! - Passing an explicit registry to a `Decoder`
//! - Falling back to the default decoder for unknown format names
//!
//! To run this example:
//! ```bash
//! cargo run --example custom_format
//! ```

use serde_json::Value;
use tagcfg::decoder::set_unmarshal_func;
use tagcfg::domain::errors::BoxError;
use tagcfg::prelude::*;

#[derive(Debug, Default)]
struct Routing {
    allowed: Vec<String>,
    weights: Vec<u32>,
    limit: u32,
}

impl Record for Routing {
    fn describe(schema: &mut Schema<Self>) {
        schema.value("Allowed", "routing.allowed,csv", |c| &mut c.allowed);
        schema.value("Weights", "routing.weights,csv-numbers", |c| &mut c.weights);
        // "toml" is not registered anywhere, so the default decoder is used
        schema.value("Limit", "routing.limit,toml", |c| &mut c.limit);
    }
}

/// Splits a comma separated list into a sequence of strings.
fn csv(bytes: &[u8], target: &mut Target<'_>) -> std::result::Result<(), BoxError> {
    let text = std::str::from_utf8(bytes)?;
    target.deserialize(Value::from(
        text.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>(),
    ))
}

/// Splits a comma separated list into a sequence of numbers.
struct CsvNumbers;

impl Unmarshaler for CsvNumbers {
    fn unmarshal(&self, bytes: &[u8], target: &mut Target<'_>) -> std::result::Result<(), BoxError> {
        let text = std::str::from_utf8(bytes)?;
        let mut numbers = Vec::new();
        for item in text.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            numbers.push(item.parse::<u64>()?);
        }
        target.deserialize(Value::from(numbers))
    }
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== tagcfg: Custom Formats ===\n");

    let source = MemorySource::new()
        .with_value("routing.allowed", "eu-west, us-east,ap-south")
        .with_value("routing.weights", "50, 30, 20")
        .with_value("routing.limit", "100");

    // Process-wide registration, seen by every decode that starts afterwards
    set_unmarshal_func("csv", csv)?;

    // A decoder with its own registry
    let mut registry = FormatRegistry::with_builtins();
    registry.register("csv", csv).register("csv-numbers", CsvNumbers);
    println!("formats: {:?}", registry.names());

    let decoder = Decoder::builder().with_registry(registry).build()?;
    let mut routing = Routing::default();
    decoder.decode(&mut routing, &source)?;
    println!("{:#?}", routing);

    // The process-wide registry knows "csv" but not "csv-numbers"
    let mut routing = Routing::default();
    match decode(&mut routing, &source, &KeyOptions::new()) {
        Ok(()) => println!("{:#?}", routing),
        Err(e) => println!("\nprocess-wide decode failed: {}", e),
    }

    Ok(())
}
