//! Subscription registry.
//!
//! Two indices, one lock:
//!
//! ```text
//!   by_id:     subId    -> Subscription
//!   by_entity: entityId -> [subId, ...]   (bucket order is meaningless)
//! ```
//!
//! Every subscription in `by_id` sits in exactly one bucket, the one keyed by
//! its current `entity_id`, and every bucket entry points back into `by_id`.
//! Empty buckets are removed. Readers take the lock shared for the whole
//! traversal and return owned copies; writers take it exclusive across both
//! index updates, so no reader ever sees the indices disagree.
//!
//! The lock is never held across I/O. Callers copy what they need and release
//! it before delivering anything.

use crate::domain::error::StoreError;
use crate::domain::subscription::{Subscription, SubscriptionId};
use parking_lot::RwLock;
use shared_types::EntityId;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Indices {
    by_id: HashMap<SubscriptionId, Subscription>,
    by_entity: HashMap<EntityId, Vec<SubscriptionId>>,
}

impl Indices {
    /// Insert a subscription whose id is not yet present.
    fn attach(&mut self, sub: Subscription) {
        self.by_entity
            .entry(sub.entity_id.clone())
            .or_default()
            .push(sub.sub_id.clone());
        self.by_id.insert(sub.sub_id.clone(), sub);
    }

    /// Remove `sub_id` from the bucket for `entity_id`, dropping the bucket if it empties.
    fn detach_from_bucket(&mut self, entity_id: &str, sub_id: &str) {
        let Some(bucket) = self.by_entity.get_mut(entity_id) else {
            return;
        };
        if let Some(pos) = bucket.iter().position(|id| id == sub_id) {
            bucket.swap_remove(pos);
        }
        if bucket.is_empty() {
            self.by_entity.remove(entity_id);
        }
    }

    fn fresh_id(&self) -> SubscriptionId {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.by_id.contains_key(&id) {
                return id;
            }
        }
    }
}

/// Concurrent, dual-indexed subscription registry.
#[derive(Debug, Default)]
pub struct SubscriptionStore {
    indices: RwLock<Indices>,
}

impl SubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscription under a freshly generated id.
    pub fn create(&self, entity_id: &str, callback_uri: &str) -> Subscription {
        let mut indices = self.indices.write();
        let sub = Subscription::new(indices.fresh_id(), entity_id, callback_uri);
        indices.attach(sub.clone());
        drop(indices);

        debug!(
            sub_id = %sub.sub_id,
            entity_id = %sub.entity_id,
            callback_uri = %sub.callback_uri,
            "Created subscription"
        );
        sub
    }

    /// Snapshot of every subscription.
    pub fn list(&self) -> Vec<Subscription> {
        self.indices.read().by_id.values().cloned().collect()
    }

    /// Insert under a caller-chosen id, or overwrite the existing entry.
    ///
    /// Returns the stored subscription and `true` if it was newly created.
    /// Changing the entity moves the id to the new entity's bucket.
    pub fn upsert(
        &self,
        sub_id: &str,
        entity_id: &str,
        callback_uri: &str,
    ) -> (Subscription, bool) {
        let sub = Subscription::new(sub_id, entity_id, callback_uri);
        let mut indices = self.indices.write();

        let previous_entity = indices.by_id.get(sub_id).map(|s| s.entity_id.clone());
        let created = match previous_entity {
            None => {
                indices.attach(sub.clone());
                true
            }
            Some(old_entity) => {
                if old_entity != sub.entity_id {
                    indices.detach_from_bucket(&old_entity, sub_id);
                    indices
                        .by_entity
                        .entry(sub.entity_id.clone())
                        .or_default()
                        .push(sub.sub_id.clone());
                }
                indices.by_id.insert(sub.sub_id.clone(), sub.clone());
                false
            }
        };
        drop(indices);

        debug!(
            sub_id = %sub.sub_id,
            entity_id = %sub.entity_id,
            created,
            "Upserted subscription"
        );
        (sub, created)
    }

    /// Remove a subscription from both indices.
    pub fn delete(&self, sub_id: &str) -> Result<Subscription, StoreError> {
        let mut indices = self.indices.write();
        let removed = indices
            .by_id
            .remove(sub_id)
            .ok_or_else(|| StoreError::NotFound {
                sub_id: sub_id.to_string(),
            })?;
        indices.detach_from_bucket(&removed.entity_id, sub_id);
        drop(indices);

        debug!(sub_id = %sub_id, entity_id = %removed.entity_id, "Removed subscription");
        Ok(removed)
    }

    /// Snapshot of the subscriptions watching `entity_id`. Possibly empty.
    pub fn find_by_entity(&self, entity_id: &str) -> Vec<Subscription> {
        let indices = self.indices.read();
        indices
            .by_entity
            .get(entity_id)
            .map(|bucket| {
                bucket
                    .iter()
                    .filter_map(|id| indices.by_id.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get(&self, sub_id: &str) -> Option<Subscription> {
        self.indices.read().by_id.get(sub_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.indices.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entities with at least one subscriber.
    pub fn entity_count(&self) -> usize {
        self.indices.read().by_entity.len()
    }

    /// Panics if the two indices disagree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let indices = self.indices.read();
        let mut seen = 0usize;
        for (entity_id, bucket) in &indices.by_entity {
            assert!(!bucket.is_empty(), "empty bucket for {entity_id}");
            for id in bucket {
                let sub = indices
                    .by_id
                    .get(id)
                    .unwrap_or_else(|| panic!("dangling id {id} in bucket {entity_id}"));
                assert_eq!(&sub.entity_id, entity_id, "{id} filed under wrong entity");
                seen += 1;
            }
        }
        assert_eq!(seen, indices.by_id.len(), "id reachable from zero or many buckets");
    }
}
