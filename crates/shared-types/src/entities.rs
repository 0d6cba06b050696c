//! # Entities
//!
//! Identity and state-label types for monitored entities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a monitored entity (e.g. a SUPI for a user equipment).
pub type EntityId = String;

/// Opaque reference to a host-owned entity.
///
/// The host passes its own entity object through this trait. The monitor never
/// inspects anything beyond the canonical identity field.
pub trait EntityRef: Send + Sync {
    /// Canonical identifier, or `None` if the entity has no identity yet.
    ///
    /// An empty string is treated the same as `None` by consumers.
    fn entity_id(&self) -> Option<&str>;
}

impl EntityRef for String {
    fn entity_id(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

/// Name of a state in the host state machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateLabel(String);

impl StateLabel {
    /// Create a label from any string-like value.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Borrow the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateLabel {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StateLabel {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for StateLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_label_serializes_as_plain_string() {
        let label = StateLabel::from("Deregistered");
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, "\"Deregistered\"");
    }

    #[test]
    fn test_string_is_its_own_entity_ref() {
        let id = String::from("imsi-208930000000001");
        assert_eq!(id.entity_id(), Some("imsi-208930000000001"));
    }
}
