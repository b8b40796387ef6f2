// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration descriptors and the integration registry.
//!
//! Integrations are registered explicitly during startup as a descriptor
//! paired with a factory. The registry is the single source of truth for
//! which integrations exist; the dispatcher reads it to resolve ids.

pub mod descriptor;
pub mod registry;

pub use descriptor::{IntegrationDescriptor, parse_integration_manifest};
pub use registry::{CatalogEntry, IntegrationFactory, IntegrationRegistry};
