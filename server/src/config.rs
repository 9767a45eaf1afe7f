//! Configuration management for the booking server.
//!
//! Loads configuration from environment variables with sensible defaults.
//!
//! | Variable               | Default             |
//! |------------------------|---------------------|
//! | `STUDIO_HOST`          | `0.0.0.0`           |
//! | `STUDIO_PORT`          | `8088`              |
//! | `STUDIO_DATA_DIR`      | `.`                 |
//! | `STUDIO_CLASSES_FILE`  | `classes.json`      |
//! | `STUDIO_BOOKINGS_FILE` | `bookings.json`     |
//! | `STUDIO_AUDIT_LOG`     | `api_responses.log` |
//! | `METRICS_PORT`         | unset (no exporter) |
//!
//! File names are resolved against the data directory unless absolute.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener configuration
    pub server: ServerConfig,
    /// Snapshot and audit file locations
    pub storage: StorageConfig,
    /// Port for the Prometheus exporter, if enabled
    pub metrics_port: Option<u16>,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` as a bind string.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// File locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Class catalog snapshot
    pub classes_path: PathBuf,
    /// Booking ledger snapshot
    pub bookings_path: PathBuf,
    /// Append-only audit log
    pub audit_log_path: PathBuf,
}

impl Config {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparseable numbers fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = PathBuf::from(lookup("STUDIO_DATA_DIR").unwrap_or_else(|| ".".to_string()));
        let in_data_dir = |key: &str, default: &str| {
            data_dir.join(lookup(key).unwrap_or_else(|| default.to_string()))
        };

        Self {
            server: ServerConfig {
                host: lookup("STUDIO_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: lookup("STUDIO_PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8088),
            },
            storage: StorageConfig {
                classes_path: in_data_dir("STUDIO_CLASSES_FILE", "classes.json"),
                bookings_path: in_data_dir("STUDIO_BOOKINGS_FILE", "bookings.json"),
                audit_log_path: in_data_dir("STUDIO_AUDIT_LOG", "api_responses.log"),
            },
            metrics_port: lookup("METRICS_PORT").and_then(|s| s.parse().ok()),
        }
    }

    /// Socket address for the Prometheus exporter, if enabled.
    #[must_use]
    pub fn metrics_address(&self) -> Option<SocketAddr> {
        self.metrics_port
            .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.server.bind_address(), "0.0.0.0:8088");
        assert_eq!(config.storage.classes_path, PathBuf::from("./classes.json"));
        assert_eq!(config.storage.bookings_path, PathBuf::from("./bookings.json"));
        assert_eq!(config.storage.audit_log_path, PathBuf::from("./api_responses.log"));
        assert_eq!(config.metrics_address(), None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("STUDIO_HOST", "127.0.0.1"),
            ("STUDIO_PORT", "9000"),
            ("STUDIO_DATA_DIR", "/var/lib/studio"),
            ("STUDIO_CLASSES_FILE", "catalog.json"),
            ("STUDIO_AUDIT_LOG", "/var/log/studio.log"),
            ("METRICS_PORT", "9100"),
        ]));

        assert_eq!(config.server.bind_address(), "127.0.0.1:9000");
        assert_eq!(
            config.storage.classes_path,
            PathBuf::from("/var/lib/studio/catalog.json")
        );
        assert_eq!(
            config.storage.bookings_path,
            PathBuf::from("/var/lib/studio/bookings.json")
        );
        // Absolute names replace the data dir
        assert_eq!(
            config.storage.audit_log_path,
            PathBuf::from("/var/log/studio.log")
        );
        assert_eq!(
            config.metrics_address(),
            Some(SocketAddr::from(([0, 0, 0, 0], 9100)))
        );
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("STUDIO_PORT", "eighty"),
            ("METRICS_PORT", "99999"),
        ]));

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.metrics_port, None);
    }
}
