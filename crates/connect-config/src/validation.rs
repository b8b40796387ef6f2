// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that run after deserialization.

use crate::diagnostic::ConfigError;
use crate::model::ConnectConfig;

/// Accepted values for `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Largest accepted `events.capacity`.
pub const MAX_EVENT_CAPACITY: usize = 1 << 16;

/// Validate a deserialized configuration.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &ConnectConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(
            "logging.level",
            format!(
                "`{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }

    if config.events.capacity == 0 {
        errors.push(ConfigError::validation(
            "events.capacity",
            "must be greater than 0",
        ));
    } else if config.events.capacity > MAX_EVENT_CAPACITY {
        errors.push(ConfigError::validation(
            "events.capacity",
            format!("must be at most {MAX_EVENT_CAPACITY}"),
        ));
    }

    if config.http.timeout_secs == 0 {
        errors.push(ConfigError::validation(
            "http.timeout_secs",
            "must be greater than 0",
        ));
    }

    if config.http.user_agent.trim().is_empty() {
        errors.push(ConfigError::validation(
            "http.user_agent",
            "must not be empty",
        ));
    }

    for (id, value) in &config.integrations {
        if id.trim().is_empty() {
            errors.push(ConfigError::validation(
                "integrations",
                "integration ids must not be empty",
            ));
        }
        if !value.is_object() {
            errors.push(ConfigError::validation(
                format!("integrations.{id}"),
                "must be a table",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
