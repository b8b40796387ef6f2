// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Connect integration hub.
//!
//! TOML files and `CONNECT_*` environment variables are layered with
//! Figment, unknown keys are rejected, and every problem is reported as a
//! miette diagnostic.
//!
//! # Usage
//!
//! ```no_run
//! use connect_config::{load_and_validate, render_errors};
//!
//! match load_and_validate() {
//!     Ok(config) => println!("log level: {}", config.logging.level),
//!     Err(errors) => render_errors(&errors),
//! }
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{ConnectConfig, EventsConfig, HttpConfig, LoggingConfig};

/// Load the standard hierarchy and validate the result.
pub fn load_and_validate() -> Result<ConnectConfig, Vec<ConfigError>> {
    finish(loader::load_config(), read_sources)
}

/// Load one TOML string and validate the result.
pub fn load_and_validate_str(toml_content: &str) -> Result<ConnectConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Load an explicit file (plus env overrides) and validate the result.
pub fn load_and_validate_path(path: &Path) -> Result<ConnectConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

fn finish(
    loaded: Result<ConnectConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<ConnectConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Contents of every config file that exists, for source spans.
fn read_sources() -> Vec<(String, String)> {
    loader::config_paths()
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            let name = std::fs::canonicalize(&path)
                .unwrap_or(path)
                .display()
                .to_string();
            Some((name, content))
        })
        .collect()
}
