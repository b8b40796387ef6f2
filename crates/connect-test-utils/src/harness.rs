// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness wiring a registry, event channel, and dispatcher together.
//!
//! `TestHarness` subscribes to the event channel before anything is
//! dispatched, so every telemetry record is available to `drain_events()`.

use std::sync::Arc;

use connect_core::{Capability, Integration, IntegrationCategory, IntegrationType};
use connect_dispatch::Dispatcher;
use connect_events::{EventChannel, EventRecord};
use connect_registry::{IntegrationDescriptor, IntegrationFactory, IntegrationRegistry};
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::mock_integration::MockIntegration;
use crate::reporter::RecordingReporter;

/// Dispatcher plus the collaborators tests inspect.
pub struct TestHarness {
    pub registry: Arc<IntegrationRegistry>,
    pub events: EventChannel,
    pub reporter: Arc<RecordingReporter>,
    pub dispatcher: Dispatcher,
    receiver: broadcast::Receiver<EventRecord>,
}

impl TestHarness {
    /// Empty registry, fresh channel, recording reporter.
    pub fn new() -> Self {
        let registry = Arc::new(IntegrationRegistry::new());
        let events = EventChannel::new();
        let receiver = events.subscribe();
        let reporter = Arc::new(RecordingReporter::new());
        let dispatcher = Dispatcher::new(Arc::clone(&registry), events.clone())
            .with_reporter(reporter.clone());

        Self {
            registry,
            events,
            reporter,
            dispatcher,
            receiver,
        }
    }

    /// Register a mock under its own id, titled `Mock <id>`.
    pub fn register_mock(&self, mock: &MockIntegration) -> bool {
        let integration_type = if mock.capabilities() == vec![Capability::WebhookReceiver] {
            IntegrationType::WebhookInput
        } else {
            IntegrationType::OrderOutput
        };
        let descriptor = IntegrationDescriptor::new(
            mock.id(),
            format!("Mock {}", mock.id()),
            IntegrationCategory::Pos,
            integration_type,
        );
        self.registry.register(descriptor, mock.factory())
    }

    pub fn register(
        &self,
        descriptor: IntegrationDescriptor,
        factory: impl IntegrationFactory + 'static,
    ) -> bool {
        self.registry.register(descriptor, factory)
    }

    /// Every telemetry record published since the last drain.
    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        let mut records = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(record) => records.push(record),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "test harness receiver lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        records
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
