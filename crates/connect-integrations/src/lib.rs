// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in integrations and their startup registration.
//!
//! Integrations do not register themselves. The host creates a registry,
//! calls [`register_builtins`] once, then freezes the registry before any
//! dispatch happens. Initializers run in the order of
//! [`BUILTIN_INITIALIZERS`].

pub mod context;
pub mod webhook_forwarder;

use connect_core::ConnectError;
use connect_registry::IntegrationRegistry;
use tracing::{debug, info};

pub use context::IntegrationContext;
pub use webhook_forwarder::{WebhookForwarder, WebhookForwarderConfig};

/// Registers one built-in integration.
pub type Initializer = fn(&IntegrationRegistry, &IntegrationContext) -> Result<(), ConnectError>;

/// Every built-in integration, in registration order.
pub const BUILTIN_INITIALIZERS: &[(&str, Initializer)] =
    &[(webhook_forwarder::ID, webhook_forwarder::register)];

/// Run every built-in initializer against `registry`.
///
/// Stops at the first initializer that fails; that is a packaging bug, not
/// a runtime condition.
pub fn register_builtins(
    registry: &IntegrationRegistry,
    ctx: &IntegrationContext,
) -> Result<(), ConnectError> {
    for (id, init) in BUILTIN_INITIALIZERS {
        debug!(integration_id = %id, "running integration initializer");
        init(registry, ctx)?;
    }
    info!(count = registry.len(), "integrations registered");
    Ok(())
}
