// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order event dispatch request.

use connect_core::{IntegrationConfigs, IntegrationPayload, OrderEventKind};
use serde::{Deserialize, Serialize};

/// One order event, the integrations to notify, and their per-call config.
///
/// Ids in `integrations` that are not registered are skipped, never fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub event: OrderEventKind,
    #[serde(default)]
    pub integrations: IntegrationConfigs,
    pub payload: IntegrationPayload,
}
