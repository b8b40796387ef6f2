// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fire-and-forget publish channel for integration telemetry.
//!
//! Backed by a tokio broadcast channel: publishing never blocks, never fails
//! the caller, and succeeds even when nobody is subscribed. Slow subscribers
//! lag and lose the oldest records instead of applying back-pressure.

use std::sync::Arc;

use chrono::Utc;
use connect_core::IntegrationType;
use tokio::sync::broadcast;
use tracing::trace;

use crate::record::{EventFields, EventRecord};

/// Name of the single topic all integration telemetry is published under.
pub const INTEGRATION_EVENT_TOPIC: &str = "integration:event";

/// Default number of records buffered per subscriber.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Largest per-subscriber buffer a channel will allocate.
pub const MAX_CAPACITY: usize = 1 << 16;

/// Publish handle for the integration telemetry topic.
///
/// Clones share the same underlying channel.
#[derive(Clone, Debug)]
pub struct EventChannel {
    sender: broadcast::Sender<EventRecord>,
}

impl EventChannel {
    /// Create a channel with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a channel buffering up to `capacity` records per subscriber.
    ///
    /// `capacity` is clamped to `1..=MAX_CAPACITY`.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_CAPACITY));
        Self { sender }
    }

    /// Subscribe to records published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<EventRecord> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Returns an emitter bound to one integration's identity.
    ///
    /// Call sites then supply only the variable fields of each record.
    pub fn create_dispatcher_for(
        &self,
        integration_name: impl Into<String>,
        integration_type: IntegrationType,
    ) -> EventEmitter {
        EventEmitter {
            channel: self.clone(),
            integration_name: Arc::from(integration_name.into()),
            integration_type,
        }
    }

    /// Stamps and publishes one record.
    ///
    /// `created_at` is taken here, at publish time.
    fn publish(
        &self,
        integration_name: &str,
        integration_type: IntegrationType,
        fields: EventFields,
    ) {
        let record = EventRecord {
            integration_name: integration_name.to_string(),
            integration_type,
            event_type: fields.event_type,
            external_id: fields.external_id,
            description: fields.event_type.description().to_string(),
            notes: fields.notes,
            metadata: fields.metadata,
            created_at: Utc::now(),
        };

        trace!(
            topic = INTEGRATION_EVENT_TOPIC,
            integration = %record.integration_name,
            event_type = %record.event_type,
            "publishing integration event"
        );

        // No subscribers is fine.
        let _ = self.sender.send(record);
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Emitter bound to a fixed integration name and type.
#[derive(Clone, Debug)]
pub struct EventEmitter {
    channel: EventChannel,
    integration_name: Arc<str>,
    integration_type: IntegrationType,
}

impl EventEmitter {
    /// Publishes a record built from `fields` and the bound identity.
    pub fn emit(&self, fields: impl Into<EventFields>) {
        self.channel
            .publish(&self.integration_name, self.integration_type, fields.into());
    }

    pub fn integration_name(&self) -> &str {
        &self.integration_name
    }

    pub fn integration_type(&self) -> IntegrationType {
        self.integration_type
    }

    /// Converts the emitter into a plain closure.
    pub fn into_fn(self) -> impl Fn(EventFields) + Send + Sync + 'static {
        move |fields: EventFields| self.emit(fields)
    }
}
