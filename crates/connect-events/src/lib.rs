// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration lifecycle telemetry.
//!
//! Integrations and the dispatcher describe each stage of an integration
//! attempt as an [`EventRecord`] and publish it on the [`EventChannel`].
//! Subscribers (audit logs, metrics pipelines) consume the stream; the
//! publishing side never waits for them.

pub mod channel;
pub mod record;

pub use channel::{
    DEFAULT_CAPACITY, EventChannel, EventEmitter, INTEGRATION_EVENT_TOPIC, MAX_CAPACITY,
};
pub use record::{EventFields, EventRecord, IntegrationEventType};
