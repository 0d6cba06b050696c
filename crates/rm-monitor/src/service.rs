//! Monitor service - wiring and server lifecycle.
//!
//! The store is created once by the caller and passed in explicitly; the
//! service hands the same instance to the management router and, through the
//! dispatcher, to the transition hook.

use crate::adapters::HttpNotificationSink;
use crate::dispatcher::NotificationDispatcher;
use crate::domain::config::MonitorConfig;
use crate::domain::error::MonitorError;
use crate::hook::EventHookAdapter;
use crate::ports::NotificationSink;
use crate::router::{build_router, AppState};
use crate::store::SubscriptionStore;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::runtime::Handle;
use tracing::info;

/// Transition monitor service
pub struct MonitorService {
    config: MonitorConfig,
    store: Arc<SubscriptionStore>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl MonitorService {
    /// Create a service delivering webhooks over HTTP.
    pub fn new(config: MonitorConfig, store: Arc<SubscriptionStore>) -> Result<Self, MonitorError> {
        config.validate()?;
        let sink = Arc::new(HttpNotificationSink::new(&config.delivery)?);
        Self::with_sink(config, store, sink)
    }

    /// Create a service with a custom delivery sink.
    pub fn with_sink(
        config: MonitorConfig,
        store: Arc<SubscriptionStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<Self, MonitorError> {
        config.validate()?;
        let dispatcher = Arc::new(NotificationDispatcher::new(
            Arc::clone(&store),
            sink,
            config.delivery.max_in_flight,
        ));

        Ok(Self {
            config,
            store,
            dispatcher,
        })
    }

    pub fn store(&self) -> Arc<SubscriptionStore> {
        Arc::clone(&self.store)
    }

    /// Hook for the host state machine, dispatching on `runtime`.
    pub fn hook(&self, runtime: Handle) -> EventHookAdapter {
        EventHookAdapter::new(Arc::clone(&self.dispatcher), runtime)
    }

    /// Management router with the full middleware stack.
    pub fn router(&self) -> Router {
        build_router(AppState::new(Arc::clone(&self.store)), &self.config.api)
    }

    /// Bind the configured management address.
    pub async fn bind(&self) -> Result<TcpListener, MonitorError> {
        let addr = self.config.http_addr();
        TcpListener::bind(addr)
            .await
            .map_err(|e| MonitorError::Bind(format!("{addr}: {e}")))
    }

    /// Serve the management API on `listener` until `shutdown` resolves.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), MonitorError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: Option<SocketAddr> = listener.local_addr().ok();
        info!(
            addr = ?addr,
            base_path = %self.config.api.base_path,
            max_in_flight = self.config.delivery.max_in_flight,
            "Starting management API"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| MonitorError::Serve(e.to_string()))?;

        info!("Management API stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::testing::RecordingSink;
    use shared_types::{TransitionHook, TransitionNotice};

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = MonitorConfig::default();
        config.api.base_path = "no-slash".into();
        let result = MonitorService::new(config, Arc::new(SubscriptionStore::new()));
        assert!(matches!(result, Err(MonitorError::Config(_))));
    }

    #[tokio::test]
    async fn test_router_and_hook_share_store() {
        let store = Arc::new(SubscriptionStore::new());
        let sink = Arc::new(RecordingSink::default());
        let service = MonitorService::with_sink(
            MonitorConfig::default(),
            Arc::clone(&store),
            Arc::clone(&sink) as Arc<dyn NotificationSink>,
        )
        .unwrap();

        service.store().create("ue-1", "http://cb");
        assert_eq!(store.len(), 1);

        let hook = service.hook(Handle::current());
        let notice = TransitionNotice::new(Arc::new(String::from("ue-1")), "e", "A", "B");
        hook.on_transition(&notice);
        let summary = hook.handle(&notice).unwrap().await.unwrap();
        assert_eq!(summary.delivered, 1);
    }
}
