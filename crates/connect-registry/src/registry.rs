// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Write-once registry of integration descriptors and their factories.
//!
//! The registry is filled during a startup phase, optionally frozen, and read
//! by the dispatcher afterwards. Registration is guarded by a lock so parallel
//! loaders cannot race on duplicate-id detection. The catalog only grows.

use std::sync::{Arc, PoisonError, RwLock};

use connect_core::{ConnectError, Integration, IntegrationType};
use tracing::{debug, warn};

use crate::descriptor::IntegrationDescriptor;

/// Produces live integration instances.
///
/// Any dependencies the instance needs (HTTP client, event channel) are
/// captured by the factory when it is registered.
pub trait IntegrationFactory: Send + Sync {
    /// Create a new integration instance.
    fn create(&self) -> Result<Box<dyn Integration>, ConnectError>;
}

impl<F> IntegrationFactory for F
where
    F: Fn() -> Result<Box<dyn Integration>, ConnectError> + Send + Sync,
{
    fn create(&self) -> Result<Box<dyn Integration>, ConnectError> {
        self()
    }
}

/// A descriptor paired with the factory that implements it.
pub struct CatalogEntry {
    /// Integration metadata.
    pub descriptor: IntegrationDescriptor,
    factory: Box<dyn IntegrationFactory>,
}

impl CatalogEntry {
    /// Create a new instance through the registered factory.
    pub fn instantiate(&self) -> Result<Box<dyn Integration>, ConnectError> {
        self.factory.create()
    }

    pub fn id(&self) -> &str {
        &self.descriptor.id
    }

    /// True if id, title, or description contains `query` (case-insensitive).
    ///
    /// An empty query matches every entry.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query_lower = query.to_lowercase();
        let d = &self.descriptor;
        d.id.to_lowercase().contains(&query_lower)
            || d.title.to_lowercase().contains(&query_lower)
            || d.description.to_lowercase().contains(&query_lower)
    }
}

impl std::fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("descriptor", &self.descriptor)
            .field("factory", &"<factory>")
            .finish()
    }
}

#[derive(Default)]
struct RegistryState {
    entries: Vec<Arc<CatalogEntry>>,
    frozen: bool,
}

/// Registry of integrations, in registration order.
#[derive(Default)]
pub struct IntegrationRegistry {
    state: RwLock<RegistryState>,
}

impl IntegrationRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an integration.
    ///
    /// The first registration for an id wins. A later registration with the
    /// same id, or any registration after [`freeze`](Self::freeze), is
    /// ignored with a warning. Returns true if the entry was added.
    pub fn register(
        &self,
        descriptor: IntegrationDescriptor,
        factory: impl IntegrationFactory + 'static,
    ) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        if state.frozen {
            warn!(
                integration_id = %descriptor.id,
                "registry is frozen, ignoring registration"
            );
            return false;
        }

        if state.entries.iter().any(|e| e.descriptor.id == descriptor.id) {
            warn!("Integration already registered: {}", descriptor.id);
            return false;
        }

        debug!(integration_id = %descriptor.id, "integration registered");
        state.entries.push(Arc::new(CatalogEntry {
            descriptor,
            factory: Box::new(factory),
        }));
        true
    }

    /// Close the registry to further registrations.
    pub fn freeze(&self) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .frozen
    }

    /// Snapshot of all entries in registration order.
    pub fn list(&self) -> Vec<Arc<CatalogEntry>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .clone()
    }

    /// Entries of the given integration type, in registration order.
    pub fn list_by_type(&self, integration_type: IntegrationType) -> Vec<Arc<CatalogEntry>> {
        self.list()
            .into_iter()
            .filter(|e| e.descriptor.integration_type == integration_type)
            .collect()
    }

    /// Entries whose id, title, or description contains `query` (case-insensitive).
    ///
    /// An empty query returns every entry.
    pub fn search(&self, query: &str) -> Vec<Arc<CatalogEntry>> {
        self.list()
            .into_iter()
            .filter(|e| e.matches(query))
            .collect()
    }

    /// Returns the number of registered integrations.
    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    /// Returns true if no integrations are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for IntegrationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("IntegrationRegistry")
            .field("entries", &state.entries.len())
            .field("frozen", &state.frozen)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use connect_core::IntegrationCategory;
    use tracing_test::traced_test;

    use super::*;

    struct Marker;

    impl Integration for Marker {}

    fn descriptor(id: &str, integration_type: IntegrationType) -> IntegrationDescriptor {
        IntegrationDescriptor::new(
            id,
            format!("Test {id}"),
            IntegrationCategory::Pos,
            integration_type,
        )
    }

    fn factory() -> impl IntegrationFactory + 'static {
        || -> Result<Box<dyn Integration>, ConnectError> { Ok(Box::new(Marker)) }
    }

    #[test]
    fn register_and_list_roundtrip() {
        let registry = IntegrationRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.register(descriptor("test-1", IntegrationType::OrderOutput), factory()));

        let entries = registry.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id(), "test-1");
        assert!(entries[0].instantiate().is_ok());
    }

    #[test]
    #[traced_test]
    fn duplicate_id_keeps_first_registration() {
        let registry = IntegrationRegistry::new();
        let mut first = descriptor("dup", IntegrationType::OrderOutput);
        first.title = "First".into();
        let mut second = descriptor("dup", IntegrationType::WebhookInput);
        second.title = "Second".into();

        assert!(registry.register(first.clone(), factory()));
        assert!(!registry.register(second, factory()));

        let entries = registry.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].descriptor, first);
        assert!(logs_contain("Integration already registered: dup"));
    }

    #[test]
    fn list_preserves_registration_order() {
        let registry = IntegrationRegistry::new();
        for id in ["zebra", "alpha", "middle"] {
            registry.register(descriptor(id, IntegrationType::OrderOutput), factory());
        }

        let ids: Vec<String> = registry.list().iter().map(|e| e.id().to_string()).collect();
        assert_eq!(ids, vec!["zebra", "alpha", "middle"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    #[traced_test]
    fn frozen_registry_rejects_new_entries() {
        let registry = IntegrationRegistry::new();
        registry.register(descriptor("early", IntegrationType::OrderOutput), factory());
        registry.freeze();
        assert!(registry.is_frozen());

        assert!(!registry.register(descriptor("late", IntegrationType::OrderOutput), factory()));
        assert_eq!(registry.len(), 1);
        assert!(logs_contain("registry is frozen"));
    }

    #[test]
    fn list_by_type_filters() {
        let registry = IntegrationRegistry::new();
        registry.register(descriptor("out", IntegrationType::OrderOutput), factory());
        registry.register(descriptor("in", IntegrationType::WebhookInput), factory());

        let inputs = registry.list_by_type(IntegrationType::WebhookInput);
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].id(), "in");
    }

    #[test]
    fn search_matches_id_title_and_description() {
        let registry = IntegrationRegistry::new();
        registry.register(
            descriptor("saipos", IntegrationType::OrderOutput)
                .with_description("Point of sale for restaurants"),
            factory(),
        );
        registry.register(descriptor("foody", IntegrationType::OrderOutput), factory());

        assert_eq!(registry.search("SAIPOS").len(), 1);
        assert_eq!(registry.search("restaurants")[0].id(), "saipos");
        assert_eq!(registry.search("").len(), 2);
        assert!(registry.search("nonexistent").is_empty());
    }

    #[test]
    fn factory_errors_surface_on_instantiate() {
        let registry = IntegrationRegistry::new();
        registry.register(
            descriptor("broken", IntegrationType::OrderOutput),
            || -> Result<Box<dyn Integration>, ConnectError> {
                Err(ConnectError::Internal("no http client".into()))
            },
        );

        let entry = &registry.list()[0];
        assert!(entry.instantiate().is_err());
    }

    #[test]
    fn concurrent_registration_of_same_id_adds_one_entry() {
        let registry = IntegrationRegistry::new();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    registry.register(descriptor("race", IntegrationType::OrderOutput), factory());
                });
            }
        });

        assert_eq!(registry.len(), 1);
    }
}
