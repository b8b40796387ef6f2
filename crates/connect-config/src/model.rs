// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Connect integration hub.
//!
//! All sections use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of silently ignored.

use connect_core::IntegrationConfigs;
use serde::{Deserialize, Serialize};

/// Top-level Connect configuration.
///
/// Every section is optional and falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Event Channel settings.
    #[serde(default)]
    pub events: EventsConfig,

    /// Settings shared by built-in integrations that talk HTTP.
    #[serde(default)]
    pub http: HttpConfig,

    /// Default per-integration config, keyed by integration id.
    ///
    /// Values are passed through verbatim as the per-call config when the
    /// caller does not supply its own.
    #[serde(default)]
    pub integrations: IntegrationConfigs,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EventsConfig {
    /// Records buffered per subscriber before the oldest are dropped.
    #[serde(default = "default_event_capacity")]
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity: default_event_capacity(),
        }
    }
}

fn default_event_capacity() -> usize {
    1024
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    concat!("connect/", env!("CARGO_PKG_VERSION")).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ConnectConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.events.capacity, 1024);
        assert_eq!(config.http.timeout_secs, 5);
        assert!(config.http.user_agent.starts_with("connect/"));
        assert!(config.integrations.is_empty());
    }
}
