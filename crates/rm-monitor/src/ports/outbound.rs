//! Outbound ports for the monitor.

use crate::domain::error::DeliveryError;
use crate::domain::subscription::Notification;
use async_trait::async_trait;

/// Destination-agnostic delivery of one notification to one callback.
///
/// One call is one attempt. Implementations do not retry.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(
        &self,
        callback_uri: &str,
        notification: &Notification,
    ) -> Result<(), DeliveryError>;
}
