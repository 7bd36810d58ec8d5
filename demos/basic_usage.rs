// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the tagcfg crate.
//!
//! This example demonstrates:
//! - Describing a record with string, scalar and formatted fields
//! - Decoding it from an in-memory source
//! - Durations written the short way ("1m30s")
//! - Inspecting which keys were fetched
//!
//! To run this example:
//! ```bash
//! RUST_LOG=debug cargo run --example basic_usage
//! ```

use serde::Deserialize;
use tagcfg::prelude::*;

#[derive(Debug, Default, Deserialize)]
struct Endpoint {
    host: String,
    port: u16,
}

#[derive(Debug, Default)]
struct ServiceConfig {
    name: String,
    workers: u32,
    verbose: bool,
    timeout: Duration,
    primary: Endpoint,
    replicas: Vec<Endpoint>,
}

impl Record for ServiceConfig {
    fn describe(schema: &mut Schema<Self>) {
        schema.string("Name", "service.name", |c| &mut c.name);
        schema.value("Workers", "service.workers", |c| &mut c.workers);
        schema.value("Verbose", "service.verbose", |c| &mut c.verbose);
        schema.value("Timeout", "service.timeout", |c| &mut c.timeout);
        schema.value("Primary", "service.primary,json", |c| &mut c.primary);
        schema.value("Replicas", "service.replicas", |c| &mut c.replicas);
    }
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== tagcfg: Basic Usage ===\n");

    let source = MemorySource::new()
        .with_value("service.name", "billing")
        .with_value("service.workers", "8")
        .with_value("service.verbose", "true")
        .with_value("service.timeout", "1m30s")
        .with_value("service.primary", r#"{"host":"db-1","port":5432}"#)
        .with_value(
            "service.replicas",
            "- host: db-2\n  port: 5432\n- host: db-3\n  port: 5433",
        );

    let mut config = ServiceConfig::default();
    decode(&mut config, &source, &KeyOptions::new())?;

    println!("name:     {}", config.name);
    println!("workers:  {}", config.workers);
    println!("verbose:  {}", config.verbose);
    println!("timeout:  {} ({:?})", config.timeout, *config.timeout);
    println!("primary:  {}:{}", config.primary.host, config.primary.port);
    for replica in &config.replicas {
        println!("replica:  {}:{}", replica.host, replica.port);
    }

    println!("\n--- Fetched keys ---");
    for fetch in source.fetches() {
        println!("{}", fetch.key);
    }

    // A value that does not fit the field aborts the decode
    println!("\n--- Decode error ---");
    let broken = MemorySource::new().with_value("service.workers", "many");
    let mut config = ServiceConfig::default();
    if let Err(e) = decode(&mut config, &broken, &KeyOptions::new()) {
        println!("{}", e);
    }

    Ok(())
}
