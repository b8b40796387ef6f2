// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telemetry record types published on the event channel.

use chrono::{DateTime, Utc};
use connect_core::IntegrationType;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Stage of an integration attempt a record describes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum IntegrationEventType {
    #[strum(serialize = "INTEGRATION_INITIATED")]
    #[serde(rename = "INTEGRATION_INITIATED")]
    Initiated,
    #[strum(serialize = "INTEGRATION_REQUESTED")]
    #[serde(rename = "INTEGRATION_REQUESTED")]
    Requested,
    #[strum(serialize = "INTEGRATION_PROCESSING")]
    #[serde(rename = "INTEGRATION_PROCESSING")]
    Processing,
    #[strum(serialize = "INTEGRATION_COMPLETED")]
    #[serde(rename = "INTEGRATION_COMPLETED")]
    Completed,
    #[strum(serialize = "INTEGRATION_FAILED")]
    #[serde(rename = "INTEGRATION_FAILED")]
    Failed,
    #[strum(serialize = "INTEGRATION_RETRIED")]
    #[serde(rename = "INTEGRATION_RETRIED")]
    Retried,
    #[strum(serialize = "INTEGRATION_CANCELLED")]
    #[serde(rename = "INTEGRATION_CANCELLED")]
    Cancelled,
}

impl IntegrationEventType {
    /// Fixed human-readable description for this event type.
    pub const fn description(self) -> &'static str {
        match self {
            IntegrationEventType::Initiated => "Integration started",
            IntegrationEventType::Requested => "Request sent to the integrated system",
            IntegrationEventType::Processing => "Integration processing in progress",
            IntegrationEventType::Completed => "Integration completed successfully",
            IntegrationEventType::Failed => "Integration failed",
            IntegrationEventType::Retried => "Integration retry attempted",
            IntegrationEventType::Cancelled => "Integration cancelled",
        }
    }
}

/// Variable part of an event, supplied at each emit site.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFields {
    pub event_type: IntegrationEventType,
    pub external_id: Option<String>,
    pub notes: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl EventFields {
    pub fn new(event_type: IntegrationEventType) -> Self {
        Self {
            event_type,
            external_id: None,
            notes: None,
            metadata: None,
        }
    }

    pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl From<IntegrationEventType> for EventFields {
    fn from(event_type: IntegrationEventType) -> Self {
        Self::new(event_type)
    }
}

/// A point-in-time fact about one stage of one integration attempt.
///
/// Records are created at publish time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub integration_name: String,
    pub integration_type: IntegrationType,
    pub event_type: IntegrationEventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
