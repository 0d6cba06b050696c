//! HTTP webhook delivery.
//!
//! One POST per call with a JSON body and a hard client timeout. Redirects are
//! not followed: any status >= 300 counts as a failed delivery.

use crate::adapters::error_conversions::delivery_error;
use crate::domain::config::DeliveryConfig;
use crate::domain::error::{DeliveryError, MonitorError};
use crate::domain::subscription::Notification;
use crate::ports::outbound::NotificationSink;
use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::Client;

/// `NotificationSink` backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpNotificationSink {
    client: Client,
}

impl HttpNotificationSink {
    pub fn new(config: &DeliveryConfig) -> Result<Self, MonitorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|e| MonitorError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl NotificationSink for HttpNotificationSink {
    async fn deliver(
        &self,
        callback_uri: &str,
        notification: &Notification,
    ) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(callback_uri)
            .json(notification)
            .send()
            .await
            .map_err(|e| delivery_error(callback_uri, e))?;

        let status = response.status();
        if status.as_u16() >= 300 {
            // Drain so the connection can be reused; the body itself is ignored.
            let _ = response.bytes().await;
            return Err(DeliveryError::Status {
                uri: callback_uri.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
