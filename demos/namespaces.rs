// SPDX-License-Identifier: MIT OR Apache-2.0

//! Namespace example for the tagcfg crate.
//!
//! This example demonstrates:
//! - Scoping nested records to a namespace
//! - Overriding the namespace of a single field
//! - Forwarding per-key options to the source
//! - Reading the same record from environment variables
//!
//! To run this example:
//! ```bash
//! export DEMO_APPLICATION_NAME="from-env"
//! export DEMO_DATABASE_HOST="db.internal"
//! export DEMO_DATABASE_PORT="6432"
//! export DEMO_SECRETS_PASSWORD="hunter2"
//!
//! cargo run --example namespaces --features env
//! ```

use tagcfg::prelude::*;

#[derive(Debug, Default)]
struct Database {
    host: String,
    port: u16,
    password: String,
}

impl Record for Database {
    fn describe(schema: &mut Schema<Self>) {
        schema.string("Host", "host", |c| &mut c.host);
        schema.value("Port", "port", |c| &mut c.port);
        schema.string("Password", "password", |c| &mut c.password).namespace("secrets");
    }
}

#[derive(Debug, Default)]
struct AppConfig {
    name: String,
    database: Database,
}

impl Record for AppConfig {
    fn describe(schema: &mut Schema<Self>) {
        schema.string("Name", "name", |c| &mut c.name).namespace("application");
        schema.nested("Database", |c| &mut c.database).namespace("database");
    }
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== tagcfg: Namespaces ===\n");

    println!("--- In-memory source ---");
    let source = MemorySource::new()
        .with_value("name", "inventory")
        .with_namespaced_value("database", "host", "localhost")
        .with_namespaced_value("database", "port", "5432")
        .with_namespaced_value("secrets", "password", "changeme");

    let decoder = Decoder::builder()
        .with_key_option("password", OpOption::custom("decrypt", "true"))
        .build()?;

    let mut config = AppConfig::default();
    decoder.decode(&mut config, &source)?;
    println!("{:#?}", config);

    for fetch in source.fetches() {
        println!("{} <- {:?}", fetch.key, fetch.options);
    }

    println!("\n--- Environment source ---");
    let env = EnvVarSource::with_prefix("DEMO_");
    println!(
        "password is read from {}",
        env.variable_name("password", Some("secrets"))
    );

    let mut config = AppConfig::default();
    match decoder.decode(&mut config, &env) {
        Ok(()) => println!("{:#?}", config),
        Err(e) => println!("decode failed (is DEMO_DATABASE_PORT set?): {}", e),
    }

    Ok(())
}
