// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Merge order, later layers override earlier ones:
//! 1. Compiled defaults
//! 2. `/etc/connect/connect.toml`
//! 3. `~/.config/connect/connect.toml` (XDG user config)
//! 4. `./connect.toml`
//! 5. `CONNECT_*` environment variables

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ConnectConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/connect/connect.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "connect.toml";

/// Sections that may be overridden from the environment.
const ENV_SECTIONS: &[&str] = &["logging", "events", "http"];

/// Path of the per-user configuration file, if a config dir is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("connect").join(LOCAL_CONFIG_FILE))
}

/// Every file the standard hierarchy reads, lowest precedence first.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
    paths.extend(user_config_path());
    paths.push(PathBuf::from(LOCAL_CONFIG_FILE));
    paths
}

/// Build the Figment for the standard hierarchy without extracting it.
pub fn build_figment() -> Figment {
    config_paths()
        .into_iter()
        .fold(defaults(), |figment, path| figment.merge(Toml::file(path)))
        .merge(env_provider())
}

/// Load configuration from the standard hierarchy with env overrides.
pub fn load_config() -> Result<ConnectConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from one TOML string, without files or env.
pub fn load_config_from_str(toml_content: &str) -> Result<ConnectConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

/// Load configuration from an explicit file, with env overrides.
pub fn load_config_from_path(path: &Path) -> Result<ConnectConfig, figment::Error> {
    defaults()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

fn defaults() -> Figment {
    Figment::new().merge(Serialized::defaults(ConnectConfig::default()))
}

/// `CONNECT_<SECTION>_<KEY>` maps to `<section>.<key>`.
///
/// The section is split off explicitly instead of with `Env::split("_")`
/// since keys such as `timeout_secs` contain underscores themselves.
/// Variables outside the known sections are ignored.
fn env_provider() -> Env {
    Env::prefixed("CONNECT_")
        .filter(|key| env_section(&key.as_str().to_ascii_lowercase()).is_some())
        .map(|key| {
            let key = key.as_str().to_ascii_lowercase();
            match env_section(&key) {
                Some(section) => format!("{section}.{}", &key[section.len() + 1..]).into(),
                None => key.into(),
            }
        })
}

fn env_section(key: &str) -> Option<&'static str> {
    ENV_SECTIONS.iter().copied().find(|section| {
        key.strip_prefix(section)
            .is_some_and(|rest| rest.starts_with('_') && rest.len() > 1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_section_requires_known_prefix_and_key() {
        assert_eq!(env_section("http_timeout_secs"), Some("http"));
        assert_eq!(env_section("logging_level"), Some("logging"));
        assert_eq!(env_section("events_capacity"), Some("events"));
        assert_eq!(env_section("http_"), None);
        assert_eq!(env_section("integrations_x"), None);
        assert_eq!(env_section("httpx_timeout"), None);
    }

    #[test]
    fn config_paths_end_with_local_file() {
        let paths = config_paths();
        assert_eq!(paths.first(), Some(&PathBuf::from(SYSTEM_CONFIG_PATH)));
        assert_eq!(paths.last(), Some(&PathBuf::from(LOCAL_CONFIG_FILE)));
    }
}
