//! Adapters for the monitor.
//!
//! Infrastructure implementations of the outbound ports.

pub mod error_conversions;
pub mod http_sink;

pub use http_sink::HttpNotificationSink;
