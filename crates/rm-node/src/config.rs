//! Node configuration from environment variables.

use rm_monitor::MonitorConfig;
use std::env;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Filter directive (trace, debug, info, warn, error, or a full `EnvFilter` string)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    pub monitor: MonitorConfig,
    pub telemetry: TelemetryConfig,

    /// Variables that were set but unusable; the default was kept.
    /// Logged once telemetry is up.
    pub fallbacks: Vec<String>,
}

impl NodeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RM_HTTP_HOST`: Management API bind address (default: 0.0.0.0)
    /// - `RM_HTTP_PORT`: Management API port (default: 8000)
    /// - `RM_BASE_PATH`: Mount point for the API (default: root)
    /// - `RM_DELIVERY_TIMEOUT`: Webhook timeout, humantime format (default: 5s)
    /// - `RM_DELIVERY_MAX_IN_FLIGHT`: Concurrent delivery cap, 0 = unbounded (default: 0)
    /// - `RM_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `RM_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`NodeConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut loader = Loader {
            lookup: &lookup,
            fallbacks: &mut config.fallbacks,
        };

        if let Some(host) = loader.parsed::<IpAddr>("RM_HTTP_HOST") {
            config.monitor.http.host = host;
        }
        if let Some(port) = loader.parsed::<u16>("RM_HTTP_PORT") {
            config.monitor.http.port = port;
        }
        if let Some(path) = lookup("RM_BASE_PATH") {
            config.monitor.api.base_path = path;
        }
        if let Some(timeout) = loader.duration("RM_DELIVERY_TIMEOUT") {
            config.monitor.delivery.timeout = timeout;
        }
        if let Some(limit) = loader.parsed::<usize>("RM_DELIVERY_MAX_IN_FLIGHT") {
            config.monitor.delivery.max_in_flight = limit;
        }

        if let Some(level) = lookup("RM_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.telemetry.log_level = level;
        }
        if let Some(json) = lookup("RM_JSON_LOGS") {
            config.telemetry.json_logs = json.eq_ignore_ascii_case("true") || json == "1";
        }

        config
    }
}

struct Loader<'a, F> {
    lookup: &'a F,
    fallbacks: &'a mut Vec<String>,
}

impl<F> Loader<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn parsed<T>(&mut self, key: &str) -> Option<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = (self.lookup)(key)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(e) => {
                self.fallbacks.push(format!("{key}={raw:?}: {e}"));
                None
            }
        }
    }

    fn duration(&mut self, key: &str) -> Option<Duration> {
        let raw = (self.lookup)(key)?;
        match humantime_serde::re::humantime::parse_duration(raw.trim()) {
            Ok(value) => Some(value),
            Err(e) => {
                self.fallbacks.push(format!("{key}={raw:?}: {e}"));
                None
            }
        }
    }
}
