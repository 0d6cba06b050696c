//! Management operations over the subscription store.
//!
//! Transport-neutral: validation and result mapping live here, HTTP status
//! codes live in `router`.

use crate::domain::error::{ApiResult, ValidationError};
use crate::domain::subscription::{Subscription, SubscriptionList, SubscriptionRequest};
use crate::store::SubscriptionStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of an update-or-insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created(Subscription),
    Updated(Subscription),
}

/// CRUD façade handed to the router.
#[derive(Clone)]
pub struct SubscriptionFacade {
    store: Arc<SubscriptionStore>,
}

impl SubscriptionFacade {
    pub fn new(store: Arc<SubscriptionStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> SubscriptionList {
        SubscriptionList {
            subscriptions: self.store.list(),
        }
    }

    pub fn create(&self, request: &SubscriptionRequest) -> ApiResult<Subscription> {
        request.validate().inspect_err(|e| {
            warn!(error = %e, "Rejected subscription create");
        })?;

        let sub = self.store.create(&request.entity_id, &request.callback_uri);
        info!(sub_id = %sub.sub_id, entity_id = %sub.entity_id, "Subscription created");
        Ok(sub)
    }

    pub fn upsert(&self, sub_id: &str, request: &SubscriptionRequest) -> ApiResult<UpsertOutcome> {
        if sub_id.is_empty() {
            warn!("Rejected subscription upsert without id");
            return Err(ValidationError::MissingField { field: "subId" }.into());
        }
        request.validate().inspect_err(|e| {
            warn!(sub_id = %sub_id, error = %e, "Rejected subscription upsert");
        })?;

        let (sub, created) = self
            .store
            .upsert(sub_id, &request.entity_id, &request.callback_uri);
        info!(sub_id = %sub.sub_id, entity_id = %sub.entity_id, created, "Subscription upserted");
        Ok(if created {
            UpsertOutcome::Created(sub)
        } else {
            UpsertOutcome::Updated(sub)
        })
    }

    pub fn delete(&self, sub_id: &str) -> ApiResult<()> {
        match self.store.delete(sub_id) {
            Ok(removed) => {
                info!(sub_id = %sub_id, entity_id = %removed.entity_id, "Subscription deleted");
                Ok(())
            }
            Err(e) => {
                warn!(sub_id = %sub_id, error = %e, "Delete of unknown subscription");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn facade() -> (Arc<SubscriptionStore>, SubscriptionFacade) {
        let store = Arc::new(SubscriptionStore::new());
        (Arc::clone(&store), SubscriptionFacade::new(store))
    }

    #[test]
    fn test_create_rejects_empty_fields_without_mutation() {
        let (store, facade) = facade();

        let err = facade
            .create(&SubscriptionRequest::new("", "http://x"))
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = facade
            .create(&SubscriptionRequest::new("ue-1", ""))
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        assert!(store.is_empty());
    }

    #[test]
    fn test_upsert_requires_id() {
        let (store, facade) = facade();
        let err = facade
            .upsert("", &SubscriptionRequest::new("ue-1", "http://cb"))
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("subId"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_upsert_maps_created_then_updated() {
        let (_, facade) = facade();
        let req = SubscriptionRequest::new("ue-1", "http://cb");

        let first = facade.upsert("sub-1", &req).unwrap();
        assert!(matches!(first, UpsertOutcome::Created(_)));

        let second = facade
            .upsert("sub-1", &SubscriptionRequest::new("ue-1", "http://cb/v2"))
            .unwrap();
        match second {
            UpsertOutcome::Updated(sub) => assert_eq!(sub.callback_uri, "http://cb/v2"),
            other => panic!("expected Updated, got {other:?}"),
        }
    }

    #[test]
    fn test_upsert_validation_precedes_mutation() {
        let (store, facade) = facade();
        assert!(facade
            .upsert("sub-1", &SubscriptionRequest::new("", "http://cb"))
            .is_err());
        assert!(store.get("sub-1").is_none());
    }

    #[test]
    fn test_delete_unknown_is_not_found() {
        let (_, facade) = facade();
        let sub = facade
            .create(&SubscriptionRequest::new("ue-1", "http://cb"))
            .unwrap();
        assert!(facade.delete(&sub.sub_id).is_ok());
        let err = facade.delete(&sub.sub_id).unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_list_envelope() {
        let (_, facade) = facade();
        facade
            .create(&SubscriptionRequest::new("ue-1", "http://cb"))
            .unwrap();
        let json = serde_json::to_value(facade.list()).unwrap();
        assert_eq!(json["subscriptions"].as_array().unwrap().len(), 1);
    }
}
