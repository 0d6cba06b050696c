//! Monitor error types.
//!
//! `ApiError` is what the management surface returns; the rest are internal
//! error classes that either map onto it or are only ever logged.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::ser::SerializeStruct;
use serde::Serialize;
use std::fmt;

/// Machine-readable error codes carried in API error bodies
pub mod codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const MISSING_FIELD: &str = "MISSING_FIELD";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}

/// Required field missing on create/upsert. Raised before any mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
}

/// Store lookups that target an unknown id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("subscription not found: {sub_id}")]
    NotFound { sub_id: String },
}

/// Outbound webhook failure. Logged and discarded, never propagated.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DeliveryError {
    #[error("delivery to {uri} timed out")]
    Timeout { uri: String },

    #[error("connection to {uri} failed: {reason}")]
    Connect { uri: String, reason: String },

    #[error("{uri} answered with status {status}")]
    Status { uri: String, status: u16 },

    #[error("request to {uri} failed: {reason}")]
    Request { uri: String, reason: String },
}

impl DeliveryError {
    /// Destination the failed delivery targeted
    pub fn uri(&self) -> &str {
        match self {
            Self::Timeout { uri }
            | Self::Connect { uri, .. }
            | Self::Status { uri, .. }
            | Self::Request { uri, .. } => uri,
        }
    }
}

/// Error returned by the management API, rendered as `{code, message}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status
    pub status: StatusCode,
    /// Stable error code
    pub code: &'static str,
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Unknown subscription
    pub fn not_found(sub_id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            codes::NOT_FOUND,
            format!("Subscription not found: {}", sub_id),
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}] {}", self.status.as_u16(), self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl Serialize for ApiError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ApiError", 2)?;
        state.serialize_field("code", self.code)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(&self)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, codes::MISSING_FIELD, e.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { sub_id } => ApiError::not_found(&sub_id),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        // Keep axum's status (400 syntax, 413 too large, 415 content type, 422 shape).
        ApiError::new(
            e.status(),
            codes::INVALID_REQUEST,
            format!("Invalid request: {}", e.body_text()),
        )
    }
}

/// Result type for management operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Service lifecycle errors (not surfaced to API callers)
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server terminated abnormally
    #[error("server error: {0}")]
    Serve(String),

    /// Outbound HTTP client could not be built
    #[error("http client error: {0}")]
    Client(String),
}
