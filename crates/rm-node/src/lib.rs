//! # RM Node
//!
//! Bootstrap for the transition monitor. The store is constructed exactly
//! once here and handed explicitly to both the management API and the
//! transition hook; nothing is reached through globals.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Install logging
//! 3. Build store, service and hook
//! 4. Serve the management API until shutdown is signalled

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod telemetry;

use anyhow::{Context, Result};
use rm_monitor::{EventHookAdapter, MonitorService, SubscriptionStore};
use shared_types::TransitionHook;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::info;

pub use config::{NodeConfig, TelemetryConfig};

/// Running monitor node.
pub struct NodeRuntime {
    service: Arc<MonitorService>,
    hook: Arc<EventHookAdapter>,
    shutdown_tx: watch::Sender<bool>,
}

impl NodeRuntime {
    /// Wire the node. Must be called from within a Tokio runtime; the hook
    /// dispatches onto it.
    pub fn new(config: NodeConfig) -> Result<Self> {
        let runtime = Handle::try_current().context("node must be created inside a runtime")?;

        let store = Arc::new(SubscriptionStore::new());
        let service = Arc::new(
            MonitorService::new(config.monitor, store).context("failed to build monitor")?,
        );
        let hook = Arc::new(service.hook(runtime));
        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            service,
            hook,
            shutdown_tx,
        })
    }

    /// Hook to register with the host state machine.
    pub fn transition_hook(&self) -> Arc<dyn TransitionHook> {
        Arc::clone(&self.hook) as Arc<dyn TransitionHook>
    }

    pub fn store(&self) -> Arc<SubscriptionStore> {
        self.service.store()
    }

    pub fn service(&self) -> Arc<MonitorService> {
        Arc::clone(&self.service)
    }

    /// Bind and serve until [`NodeRuntime::shutdown`] is called.
    pub async fn run(&self) -> Result<()> {
        let listener = self.service.bind().await?;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        self.service
            .serve(listener, async move {
                let _ = shutdown_rx.wait_for(|stop| *stop).await;
            })
            .await?;
        Ok(())
    }

    /// Signal the management API to stop accepting connections.
    pub fn shutdown(&self) {
        info!("Initiating graceful shutdown...");
        // Stored even with no receiver yet, so a later `run` stops immediately.
        self.shutdown_tx.send_replace(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;

    fn local_config() -> NodeConfig {
        let mut config = NodeConfig::default();
        config.monitor.http.host = IpAddr::V4(Ipv4Addr::LOCALHOST);
        config.monitor.http.port = 0;
        config
    }

    #[tokio::test]
    async fn test_hook_and_api_share_store() {
        let node = NodeRuntime::new(local_config()).unwrap();
        node.store().create("ue-1", "http://127.0.0.1:9/cb");
        assert_eq!(node.service().store().len(), 1);

        // No subscriber for this entity: nothing to deliver.
        let notice = shared_types::TransitionNotice::new(
            Arc::new(String::from("ue-2")),
            "Start",
            "Deregistered",
            "Registered",
        );
        node.transition_hook().on_transition(&notice);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let node = Arc::new(NodeRuntime::new(local_config()).unwrap());
        let runner = Arc::clone(&node);
        let task = tokio::spawn(async move { runner.run().await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        node.shutdown();

        let result = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }

    #[test]
    fn test_new_outside_runtime_fails() {
        assert!(NodeRuntime::new(local_config()).is_err());
    }
}
