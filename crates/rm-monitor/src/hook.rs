//! Host transition hook.
//!
//! Bridges the host state machine's synchronous callback to async dispatch.
//! The host thread only resolves the entity id and schedules work on the
//! monitor's runtime; the store lookup and every delivery happen on that
//! runtime after `on_transition` has already returned.

use crate::dispatcher::{DispatchSummary, NotificationDispatcher};
use shared_types::{TransitionHook, TransitionNotice};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// `TransitionHook` implementation handed to the host at startup.
#[derive(Clone)]
pub struct EventHookAdapter {
    dispatcher: Arc<NotificationDispatcher>,
    runtime: Handle,
}

impl EventHookAdapter {
    /// Dispatch work is scheduled on `runtime`, whichever thread the host calls from.
    pub fn new(dispatcher: Arc<NotificationDispatcher>, runtime: Handle) -> Self {
        Self {
            dispatcher,
            runtime,
        }
    }

    /// Use the runtime of the calling context.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn on_current_runtime(dispatcher: Arc<NotificationDispatcher>) -> Self {
        Self::new(dispatcher, Handle::current())
    }

    /// Schedule dispatch for `notice` and return immediately.
    ///
    /// Returns `None` when the notice carries no usable entity identity; nothing
    /// is dispatched in that case.
    pub fn handle(&self, notice: &TransitionNotice) -> Option<JoinHandle<DispatchSummary>> {
        let Some(entity_id) = notice.entity_id() else {
            warn!(
                event = %notice.event,
                from = %notice.from,
                to = %notice.to,
                has_entity = notice.entity.is_some(),
                "Transition without entity identity, not dispatching"
            );
            return None;
        };

        let entity_id = entity_id.to_string();
        let from = notice.from.to_string();
        let to = notice.to.to_string();
        debug!(
            entity_id = %entity_id,
            event = %notice.event,
            from = %from,
            to = %to,
            "Transition observed"
        );

        let dispatcher = Arc::clone(&self.dispatcher);
        Some(
            self.runtime
                .spawn(async move { dispatcher.dispatch(&entity_id, &from, &to).await }),
        )
    }
}

impl TransitionHook for EventHookAdapter {
    fn on_transition(&self, notice: &TransitionNotice) {
        // Detached: the host never waits on delivery.
        let _ = self.handle(notice);
    }
}
