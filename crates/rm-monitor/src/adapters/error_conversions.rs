//! Error conversions from infrastructure types.
//!
//! These conversions involve I/O types and belong in the adapters layer.

use crate::domain::DeliveryError;

/// Classify a `reqwest` failure for the destination it targeted.
pub fn delivery_error(uri: &str, e: reqwest::Error) -> DeliveryError {
    let uri = uri.to_string();
    if e.is_timeout() {
        DeliveryError::Timeout { uri }
    } else if e.is_connect() {
        DeliveryError::Connect {
            uri,
            reason: e.to_string(),
        }
    } else if let Some(status) = e.status() {
        DeliveryError::Status {
            uri,
            status: status.as_u16(),
        }
    } else {
        DeliveryError::Request {
            uri,
            reason: e.to_string(),
        }
    }
}
