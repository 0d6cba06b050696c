//! RM Monitor - subscriptions to host state transitions, delivered as webhooks.
//!
//! # Architecture
//!
//! ```text
//!   host state machine                         management clients
//!          │ on_transition()                          │ HTTP
//!          ▼                                          ▼
//!  ┌──────────────────┐                    ┌─────────────────────┐
//!  │ EventHookAdapter │                    │ router → Facade     │
//!  └────────┬─────────┘                    └──────────┬──────────┘
//!           │ spawn (host returns)                    │
//!           ▼                                         ▼
//!  ┌────────────────────────┐  find_by_entity  ┌───────────────────┐
//!  │ NotificationDispatcher │ ───────────────▶ │ SubscriptionStore │
//!  └────────┬───────────────┘                  └───────────────────┘
//!           │ one task per subscriber
//!           ▼
//!   NotificationSink (HTTP POST, 5 s timeout, no retry)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use rm_monitor::{MonitorConfig, MonitorService, SubscriptionStore};
//!
//! let store = Arc::new(SubscriptionStore::new());
//! let service = MonitorService::new(MonitorConfig::default(), store)?;
//! host.attach_hook(Arc::new(service.hook(Handle::current())));
//! let listener = service.bind().await?;
//! service.serve(listener, shutdown_signal()).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod dispatcher;
pub mod domain;
pub mod facade;
pub mod hook;
pub mod middleware;
pub mod ports;
pub mod router;
pub mod service;
pub mod store;

// Re-exports for public API
pub use adapters::HttpNotificationSink;
pub use dispatcher::{DispatchSummary, NotificationDispatcher};
pub use domain::config::MonitorConfig;
pub use domain::error::{ApiError, ApiResult, DeliveryError, MonitorError, StoreError};
pub use domain::subscription::{Notification, Subscription, SubscriptionList, SubscriptionRequest};
pub use facade::{SubscriptionFacade, UpsertOutcome};
pub use hook::EventHookAdapter;
pub use ports::NotificationSink;
pub use service::MonitorService;
pub use store::SubscriptionStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
