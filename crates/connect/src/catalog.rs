// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `connect list` and `connect show`.

use std::sync::Arc;

use connect_core::{ConnectError, IntegrationType};
use connect_registry::{CatalogEntry, IntegrationRegistry};

/// Entries matching the optional search text and type filter.
pub fn select(
    registry: &IntegrationRegistry,
    search: Option<&str>,
    integration_type: Option<IntegrationType>,
) -> Vec<Arc<CatalogEntry>> {
    let query = search.unwrap_or_default();
    match integration_type {
        Some(integration_type) => registry
            .list_by_type(integration_type)
            .into_iter()
            .filter(|e| e.matches(query))
            .collect(),
        None => registry.search(query),
    }
}

/// Run the `connect list` command.
pub fn run_list(
    registry: &IntegrationRegistry,
    search: Option<&str>,
    integration_type: Option<IntegrationType>,
    json: bool,
) -> Result<(), ConnectError> {
    let entries = select(registry, search, integration_type);

    if json {
        let descriptors: Vec<_> = entries.iter().map(|e| &e.descriptor).collect();
        let rendered = serde_json::to_string_pretty(&descriptors)
            .map_err(|e| ConnectError::Internal(format!("failed to render catalog: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    if entries.is_empty() {
        println!("no integrations found");
        return Ok(());
    }

    println!("{}", format_row("ID", "TITLE", "CATEGORY", "TYPE", "VERSION"));
    for entry in &entries {
        let d = &entry.descriptor;
        println!(
            "{}",
            format_row(
                &d.id,
                &d.title,
                &d.category.to_string(),
                &d.integration_type.to_string(),
                &d.version,
            )
        );
    }
    Ok(())
}

/// Run the `connect show <id>` command.
pub fn run_show(registry: &IntegrationRegistry, id: &str) -> Result<(), ConnectError> {
    let entry = registry
        .list()
        .into_iter()
        .find(|e| e.id() == id)
        .ok_or_else(|| ConnectError::IntegrationNotFound { id: id.to_string() })?;

    let rendered = serde_json::to_string_pretty(&entry.descriptor)
        .map_err(|e| ConnectError::Internal(format!("failed to render descriptor: {e}")))?;
    println!("{rendered}");
    Ok(())
}

fn format_row(id: &str, title: &str, category: &str, kind: &str, version: &str) -> String {
    format!("{id:<24} {title:<32} {category:<10} {kind:<13} {version}")
}
