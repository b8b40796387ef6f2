// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup wiring: registry, event channel, built-ins, dispatcher.

use std::sync::Arc;

use connect_config::ConnectConfig;
use connect_core::ConnectError;
use connect_dispatch::Dispatcher;
use connect_events::EventChannel;
use connect_integrations::{IntegrationContext, register_builtins};
use connect_registry::IntegrationRegistry;
use tracing::debug;

/// Everything a command needs, built once per process.
pub struct App {
    pub registry: Arc<IntegrationRegistry>,
    pub events: EventChannel,
    pub dispatcher: Dispatcher,
}

impl App {
    /// Register every built-in integration and freeze the registry.
    pub fn bootstrap(config: &ConnectConfig) -> Result<Self, ConnectError> {
        let events = EventChannel::with_capacity(config.events.capacity);
        let registry = Arc::new(IntegrationRegistry::new());

        let ctx = IntegrationContext::from_config(&config.http, events.clone())?;
        register_builtins(&registry, &ctx)?;
        registry.freeze();
        debug!(integrations = registry.len(), "registry frozen");

        let dispatcher = Dispatcher::new(Arc::clone(&registry), events.clone());
        Ok(Self {
            registry,
            events,
            dispatcher,
        })
    }
}
