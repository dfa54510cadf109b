//! Configuration management for the stockroom application.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default snapshot location
pub const DEFAULT_SOURCE: &str = "data/data.json";

/// Default log filter
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default load timeout in seconds
pub const DEFAULT_LOAD_TIMEOUT_SECS: u64 = 10;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockroomConfig {
    /// Snapshot location: a file path, or an `http(s)://` URL
    pub source: String,
    /// Log filter (trace, debug, info, warn, error, or an `EnvFilter` directive)
    pub log_level: String,
    /// Upper bound on one snapshot fetch, in seconds
    pub load_timeout_secs: u64,
}

impl StockroomConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            source: lookup("STOCKROOM_SOURCE")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            log_level: lookup("STOCKROOM_LOG_LEVEL")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            load_timeout_secs: lookup("STOCKROOM_LOAD_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_LOAD_TIMEOUT_SECS),
        }
    }

    /// Load timeout as a [`Duration`]
    #[must_use]
    pub const fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = StockroomConfig::default();
        assert_eq!(config.source, "data/data.json");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.load_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn reads_variables() {
        let config = StockroomConfig::from_lookup(lookup(&[
            ("STOCKROOM_SOURCE", "https://example.com/data.json"),
            ("STOCKROOM_LOG_LEVEL", "stockroom=debug"),
            ("STOCKROOM_LOAD_TIMEOUT_SECS", "3"),
        ]));
        assert_eq!(config.source, "https://example.com/data.json");
        assert_eq!(config.log_level, "stockroom=debug");
        assert_eq!(config.load_timeout_secs, 3);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = StockroomConfig::from_lookup(lookup(&[
            ("STOCKROOM_SOURCE", "  "),
            ("STOCKROOM_LOAD_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.load_timeout_secs, DEFAULT_LOAD_TIMEOUT_SECS);

        let zero = StockroomConfig::from_lookup(lookup(&[("STOCKROOM_LOAD_TIMEOUT_SECS", "0")]));
        assert_eq!(zero.load_timeout_secs, DEFAULT_LOAD_TIMEOUT_SECS);
    }

    #[test]
    fn serializes() {
        let json = serde_json::to_value(StockroomConfig::default());
        assert!(matches!(json, Ok(value) if value["load_timeout_secs"] == 10));
    }
}
