// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification enums and common aliases shared across the hub.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Per-call configuration keyed by integration id.
///
/// Iteration follows key order; dispatch makes no ordering promise beyond that.
pub type IntegrationConfigs = BTreeMap<String, serde_json::Value>;

/// Query string parameters attached to an inbound webhook request.
pub type QueryParams = serde_json::Map<String, serde_json::Value>;

/// Business category of an integration, used for presentation and filtering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum IntegrationCategory {
    #[serde(rename = "POS")]
    #[strum(serialize = "POS")]
    Pos,
    Logistics,
}

/// Direction of data flow an integration handles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum IntegrationType {
    /// Receives orders pushed out by the hub.
    OrderOutput,
    /// Receives inbound webhook data routed to it by id.
    WebhookInput,
}

/// A named method contract an integration instance may implement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Capability {
    #[strum(serialize = "onOrderCreated")]
    #[serde(rename = "onOrderCreated")]
    OrderCreated,
    #[strum(serialize = "onOrderUpdated")]
    #[serde(rename = "onOrderUpdated")]
    OrderUpdated,
    #[strum(serialize = "onOrderCanceled")]
    #[serde(rename = "onOrderCanceled")]
    OrderCanceled,
    #[strum(serialize = "onWebhookData")]
    #[serde(rename = "onWebhookData")]
    WebhookReceiver,
}

impl Capability {
    /// All capabilities, in declaration order.
    pub const ALL: [Capability; 4] = [
        Capability::OrderCreated,
        Capability::OrderUpdated,
        Capability::OrderCanceled,
        Capability::WebhookReceiver,
    ];
}

/// Order lifecycle event that can be dispatched to order-output integrations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OrderEventKind {
    Created,
    Updated,
    Canceled,
}

impl OrderEventKind {
    /// The capability an integration must implement to handle this event.
    pub fn capability(self) -> Capability {
        match self {
            OrderEventKind::Created => Capability::OrderCreated,
            OrderEventKind::Updated => Capability::OrderUpdated,
            OrderEventKind::Canceled => Capability::OrderCanceled,
        }
    }
}
