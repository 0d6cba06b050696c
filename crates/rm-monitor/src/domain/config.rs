//! Monitor configuration with validation.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main monitor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Management HTTP server
    pub http: HttpConfig,
    /// Management API shape and limits
    pub api: ApiConfig,
    /// Outbound webhook delivery
    pub delivery: DeliveryConfig,
}

impl MonitorConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.api.base_path;
        if !base.is_empty() && (!base.starts_with('/') || base.ends_with('/')) {
            return Err(ConfigError::InvalidBasePath(base.clone()));
        }

        if self.api.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_bytes cannot be 0".into(),
            ));
        }

        if self.api.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request_timeout cannot be 0".into(),
            ));
        }

        if self.delivery.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "delivery timeout cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8000)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8000,
        }
    }
}

/// Management API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Prefix all routes are mounted under, e.g. `/namf-rmm/v1`. Empty = root.
    pub base_path: String,
    /// Maximum accepted request body
    pub max_body_bytes: usize,
    /// Per-request processing timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            max_body_bytes: 64 * 1024,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Webhook delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Per-delivery client timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Maximum simultaneous outbound deliveries across all transitions.
    /// 0 (default) = unbounded; a cap lets slow endpoints delay others.
    pub max_in_flight: usize,
    /// User-Agent header sent with every delivery
    pub user_agent: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_in_flight: 0,
            user_agent: format!("rm-monitor/{}", crate::VERSION),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Base path not of the form `/segment[/segment...]`
    #[error("invalid base path: {0:?}")]
    InvalidBasePath(String),
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}
