// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration descriptors and their `integration.toml` manifest form.
//!
//! A descriptor is the identity and presentation of an integration, kept
//! apart from the code that implements it.

use std::str::FromStr;

use connect_core::{ConnectError, IntegrationCategory, IntegrationType};
use serde::{Deserialize, Serialize};

/// Immutable metadata describing one integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationDescriptor {
    /// Unique, stable key (e.g., "webhook-forwarder").
    pub id: String,
    /// Display name.
    pub title: String,
    /// Human-readable description.
    pub description: String,
    pub logo_url: String,
    pub website_url: String,
    pub category: IntegrationCategory,
    #[serde(rename = "type")]
    pub integration_type: IntegrationType,
    /// Semantic version string.
    pub version: String,
    /// JSON Schema for the per-call configuration. Validated by callers, not the hub.
    pub config_schema: serde_json::Value,
}

impl IntegrationDescriptor {
    /// Creates a descriptor with empty presentation fields and an empty schema.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: IntegrationCategory,
        integration_type: IntegrationType,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            logo_url: String::new(),
            website_url: String::new(),
            category,
            integration_type,
            version: "0.1.0".to_string(),
            config_schema: empty_schema(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_config_schema(mut self, schema: serde_json::Value) -> Self {
        self.config_schema = schema;
        self
    }
}

fn empty_schema() -> serde_json::Value {
    serde_json::json!({ "type": "object" })
}

/// Intermediate TOML deserialization struct for `integration.toml`.
#[derive(Debug, Deserialize)]
struct IntegrationManifestFile {
    integration: IntegrationSection,
}

/// The `[integration]` section of an `integration.toml` file.
#[derive(Debug, Deserialize)]
struct IntegrationSection {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    logo_url: String,
    #[serde(default)]
    website_url: String,
    category: String,
    #[serde(rename = "type")]
    integration_type: String,
    version: String,
    #[serde(default = "empty_schema")]
    config_schema: serde_json::Value,
}

/// Parse an integration descriptor from TOML content.
///
/// Validates that id and title are non-empty, version is valid semver, and
/// category/type name known variants.
pub fn parse_integration_manifest(
    toml_content: &str,
) -> Result<IntegrationDescriptor, ConnectError> {
    let file: IntegrationManifestFile = toml::from_str(toml_content)
        .map_err(|e| ConnectError::Config(format!("invalid integration manifest: {e}")))?;

    let section = file.integration;

    if section.id.trim().is_empty() {
        return Err(ConnectError::Config(
            "integration manifest: id must not be empty".to_string(),
        ));
    }

    if section.title.trim().is_empty() {
        return Err(ConnectError::Config(format!(
            "integration manifest '{}': title must not be empty",
            section.id
        )));
    }

    semver::Version::parse(&section.version).map_err(|e| {
        ConnectError::Config(format!(
            "integration manifest '{}': invalid version '{}': {e}",
            section.id, section.version
        ))
    })?;

    let category = IntegrationCategory::from_str(&section.category).map_err(|_| {
        ConnectError::Config(format!(
            "integration manifest '{}': invalid category '{}'. Expected one of: POS, Logistics",
            section.id, section.category
        ))
    })?;

    let integration_type = IntegrationType::from_str(&section.integration_type).map_err(|_| {
        ConnectError::Config(format!(
            "integration manifest '{}': invalid type '{}'. Expected one of: OrderOutput, WebhookInput",
            section.id, section.integration_type
        ))
    })?;

    Ok(IntegrationDescriptor {
        id: section.id,
        title: section.title,
        description: section.description,
        logo_url: section.logo_url,
        website_url: section.website_url,
        category,
        integration_type,
        version: section.version,
        config_schema: section.config_schema,
    })
}
