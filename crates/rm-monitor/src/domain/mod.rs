//! Domain types for the transition monitor.
//!
//! Records, configuration and error handling. Nothing in here performs I/O.

pub mod config;
pub mod error;
pub mod subscription;

// Re-exports for convenience
pub use config::{ApiConfig, ConfigError, DeliveryConfig, HttpConfig, MonitorConfig};
pub use error::{ApiError, ApiResult, DeliveryError, MonitorError, StoreError, ValidationError};
pub use subscription::{
    Notification, Subscription, SubscriptionId, SubscriptionList, SubscriptionRequest,
};
