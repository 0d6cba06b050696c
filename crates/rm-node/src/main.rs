//! # RM Node
//!
//! Runs the transition monitor's management API until Ctrl+C.

use std::sync::Arc;

use anyhow::Result;
use rm_node::{telemetry, NodeConfig, NodeRuntime};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = NodeConfig::from_env();

    // Initialize logging
    telemetry::init_telemetry(&config.telemetry)?;
    for fallback in &config.fallbacks {
        warn!(setting = %fallback, "Ignoring invalid environment value, using default");
    }

    info!("===========================================");
    info!("  RM Monitor Node v{}", rm_monitor::VERSION);
    info!("===========================================");
    info!("HTTP: {}", config.monitor.http_addr());
    info!("Delivery timeout: {:?}", config.monitor.delivery.timeout);

    let node = Arc::new(NodeRuntime::new(config)?);

    let signal_node = Arc::clone(&node);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => signal_node.shutdown(),
            Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    info!("Node is running. Press Ctrl+C to stop.");
    node.run().await?;

    info!("Shutdown complete");
    Ok(())
}
