//! Subscription and notification records.
//!
//! Wire names follow the management API: `subId`, `entityId`, `callbackURI`.

use serde::{Deserialize, Serialize};
use shared_types::EntityId;

use super::error::ValidationError;

/// Subscription ID (opaque, unique across the store)
pub type SubscriptionId = String;

/// A registered interest of one consumer in one entity's transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(rename = "subId")]
    pub sub_id: SubscriptionId,
    #[serde(rename = "entityId")]
    pub entity_id: EntityId,
    #[serde(rename = "callbackURI")]
    pub callback_uri: String,
}

impl Subscription {
    pub fn new(
        sub_id: impl Into<SubscriptionId>,
        entity_id: impl Into<EntityId>,
        callback_uri: impl Into<String>,
    ) -> Self {
        Self {
            sub_id: sub_id.into(),
            entity_id: entity_id.into(),
            callback_uri: callback_uri.into(),
        }
    }
}

/// Body of create and upsert requests.
///
/// `ueId` / `notifyUri` are accepted for clients of the older AMF-flavoured API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionRequest {
    #[serde(rename = "entityId", alias = "ueId", default)]
    pub entity_id: String,
    #[serde(rename = "callbackURI", alias = "notifyUri", default)]
    pub callback_uri: String,
}

impl SubscriptionRequest {
    pub fn new(entity_id: impl Into<String>, callback_uri: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            callback_uri: callback_uri.into(),
        }
    }

    /// Reject empty required fields before anything touches the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.entity_id.is_empty() {
            return Err(ValidationError::MissingField { field: "entityId" });
        }
        if self.callback_uri.is_empty() {
            return Err(ValidationError::MissingField {
                field: "callbackURI",
            });
        }
        Ok(())
    }
}

/// Envelope returned by the list operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionList {
    pub subscriptions: Vec<Subscription>,
}

/// Webhook payload for one subscriber and one transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "subId")]
    pub sub_id: SubscriptionId,
    #[serde(rename = "entityId")]
    pub entity_id: EntityId,
    pub from: String,
    pub to: String,
}

impl Notification {
    pub fn for_subscription(subscription: &Subscription, from: &str, to: &str) -> Self {
        Self {
            sub_id: subscription.sub_id.clone(),
            entity_id: subscription.entity_id.clone(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}
