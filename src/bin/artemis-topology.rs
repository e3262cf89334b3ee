// Copyright (c) 2025 - Cowboy AI, Inc.
//! Artemis Topology Dump
//!
//! Connects to an Artemis broker's Jolokia endpoint, reconciles its addresses
//! and queues, and prints them.
//!
//! Run with: cargo run --bin artemis-topology [-- --json]
//!
//! Configuration comes from `ARTEMIS_*` environment variables (see
//! `ArtemisConfig::from_env`), e.g. `ARTEMIS_HOST`, `ARTEMIS_WEB_PORT`,
//! `ARTEMIS_USER`, `ARTEMIS_PASSWORD`.

use anyhow::{Context, Result};
use messaging_harness::{Artemis, ArtemisConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let json = std::env::args().skip(1).any(|arg| arg == "--json");

    let config = ArtemisConfig::from_env().context("Failed to load Artemis configuration")?;
    info!("📋 Configuration loaded:");
    info!("  - Broker: {}", config.broker_name);
    info!("  - Management: http://{}:{}/{}", config.host, config.web_port, config.management_path);

    let mut broker = Artemis::jolokia(&config);
    let refreshed = broker
        .refresh()
        .await
        .context("Failed to reconcile broker topology")?;
    if !refreshed {
        warn!("⚠️  Management API unavailable, topology is empty");
    }

    let snapshot = broker.snapshot();
    if json {
        let output = serde_json::to_string_pretty(snapshot.addresses())
            .context("Failed to serialize topology")?;
        println!("{}", output);
        return Ok(());
    }

    for address in snapshot.addresses() {
        println!("{} [{}]", address.name(), address.routing_type());
        for queue in address.queues() {
            println!(
                "  └─ {} [{}] messages={}",
                queue.name(),
                queue.routing_type(),
                queue.message_count()
            );
        }
    }
    info!(
        "✅ {} addresses, {} queues",
        snapshot.addresses().len(),
        snapshot.queues().len()
    );

    Ok(())
}
