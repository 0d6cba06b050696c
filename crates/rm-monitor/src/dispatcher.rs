//! Notification dispatch.
//!
//! For one transition: copy the entity's subscribers out of the store, then
//! launch one independent delivery task per subscriber. Deliveries are single
//! best-effort attempts. A failure is logged and counted, nothing more; it
//! never affects the other deliveries of the same transition.
//!
//! Delivery tasks are detached `tokio` tasks, so dropping a pending
//! `dispatch` future does not cancel deliveries that already started.

use crate::domain::subscription::{Notification, Subscription};
use crate::ports::outbound::NotificationSink;
use crate::store::SubscriptionStore;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info, trace};

/// Outcome counts for one dispatched transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Fans a transition out to every subscriber of the entity.
pub struct NotificationDispatcher {
    store: Arc<SubscriptionStore>,
    sink: Arc<dyn NotificationSink>,
    /// Caps simultaneous outbound deliveries. `None` = unbounded.
    limiter: Option<Arc<Semaphore>>,
}

impl NotificationDispatcher {
    /// `max_in_flight == 0` disables the delivery cap.
    pub fn new(
        store: Arc<SubscriptionStore>,
        sink: Arc<dyn NotificationSink>,
        max_in_flight: usize,
    ) -> Self {
        let limiter = (max_in_flight > 0).then(|| Arc::new(Semaphore::new(max_in_flight)));
        Self {
            store,
            sink,
            limiter,
        }
    }

    /// Deliver `{subId, entityId, from, to}` to every subscriber of `entity_id`.
    ///
    /// Resolves once every launched delivery has finished or timed out.
    pub async fn dispatch(&self, entity_id: &str, from: &str, to: &str) -> DispatchSummary {
        // The store lock is released before this returns; no I/O happens under it.
        let subscriptions = self.store.find_by_entity(entity_id);
        if subscriptions.is_empty() {
            trace!(entity_id = %entity_id, "No subscriptions for entity");
            return DispatchSummary::default();
        }

        let handles: Vec<JoinHandle<bool>> = subscriptions
            .into_iter()
            .map(|sub| self.spawn_delivery(sub, from, to))
            .collect();

        let mut summary = DispatchSummary {
            attempted: handles.len(),
            ..DispatchSummary::default()
        };
        for handle in handles {
            match handle.await {
                Ok(true) => summary.delivered += 1,
                Ok(false) => summary.failed += 1,
                Err(e) => {
                    error!(entity_id = %entity_id, error = %e, "Delivery task aborted");
                    summary.failed += 1;
                }
            }
        }

        info!(
            entity_id = %entity_id,
            from = %from,
            to = %to,
            attempted = summary.attempted,
            delivered = summary.delivered,
            failed = summary.failed,
            "Transition dispatched"
        );
        summary
    }

    fn spawn_delivery(&self, sub: Subscription, from: &str, to: &str) -> JoinHandle<bool> {
        let sink = Arc::clone(&self.sink);
        let limiter = self.limiter.clone();
        let notification = Notification::for_subscription(&sub, from, to);

        tokio::spawn(async move {
            let _permit = match limiter {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };

            match sink.deliver(&sub.callback_uri, &notification).await {
                Ok(()) => {
                    info!(
                        sub_id = %sub.sub_id,
                        callback_uri = %sub.callback_uri,
                        "Notification delivered"
                    );
                    true
                }
                Err(e) => {
                    error!(
                        sub_id = %sub.sub_id,
                        callback_uri = %sub.callback_uri,
                        error = %e,
                        "Notification delivery failed"
                    );
                    false
                }
            }
        })
    }
}
