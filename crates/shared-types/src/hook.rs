//! # Transition Hook
//!
//! The callback contract the host state machine honors after committing a
//! transition.

use crate::entities::{EntityRef, StateLabel};
use std::fmt;
use std::sync::Arc;

/// A committed transition, as reported by the host.
#[derive(Clone)]
pub struct TransitionNotice {
    /// The entity that transitioned. The host's argument bag may lack it.
    pub entity: Option<Arc<dyn EntityRef>>,
    /// Name of the event that drove the transition. Informational only.
    pub event: String,
    /// State before the transition.
    pub from: StateLabel,
    /// State after the transition.
    pub to: StateLabel,
}

impl TransitionNotice {
    /// Build a notice for a resolved entity.
    pub fn new(
        entity: Arc<dyn EntityRef>,
        event: impl Into<String>,
        from: impl Into<StateLabel>,
        to: impl Into<StateLabel>,
    ) -> Self {
        Self {
            entity: Some(entity),
            event: event.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Build a notice whose argument bag carried no entity.
    pub fn without_entity(
        event: impl Into<String>,
        from: impl Into<StateLabel>,
        to: impl Into<StateLabel>,
    ) -> Self {
        Self {
            entity: None,
            event: event.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Canonical entity id, if the notice carries an entity with a non-empty id.
    pub fn entity_id(&self) -> Option<&str> {
        self.entity
            .as_deref()
            .and_then(|e| e.entity_id())
            .filter(|id| !id.is_empty())
    }
}

impl fmt::Debug for TransitionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionNotice")
            .field("entity_id", &self.entity_id())
            .field("event", &self.event)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

/// Hook invoked by the host once per committed transition.
///
/// Implementations must return promptly: any I/O triggered by the transition
/// runs elsewhere. Implementations must never call back into the host.
pub trait TransitionHook: Send + Sync {
    /// Observe a committed transition.
    fn on_transition(&self, notice: &TransitionNotice);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Anonymous;

    impl EntityRef for Anonymous {
        fn entity_id(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn test_entity_id_resolves() {
        let notice = TransitionNotice::new(
            Arc::new(String::from("ue-1")),
            "StartAuth",
            "Deregistered",
            "Authentication",
        );
        assert_eq!(notice.entity_id(), Some("ue-1"));
        assert_eq!(notice.from.as_str(), "Deregistered");
        assert_eq!(notice.to.as_str(), "Authentication");
    }

    #[test]
    fn test_missing_identity_is_none() {
        let empty = TransitionNotice::new(Arc::new(String::new()), "e", "a", "b");
        assert_eq!(empty.entity_id(), None);

        let anonymous = TransitionNotice::new(Arc::new(Anonymous), "e", "a", "b");
        assert_eq!(anonymous.entity_id(), None);

        let absent = TransitionNotice::without_entity("e", "a", "b");
        assert_eq!(absent.entity_id(), None);
    }
}
