//! Ports (hexagonal boundaries) of the monitor.

pub mod outbound;

pub use outbound::NotificationSink;
