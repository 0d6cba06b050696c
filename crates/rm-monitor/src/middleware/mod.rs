//! Middleware stack for the management API.
//!
//! Layer order: Request → Tracing → Timeout → Handler. Request body size is
//! capped separately by the router's `DefaultBodyLimit` layer.

pub mod tracing;

pub use self::tracing::TracingLayer;
