// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order-output capabilities.

use async_trait::async_trait;

use crate::error::ConnectError;
use crate::order::IntegrationPayload;

/// Handles newly created orders.
#[async_trait]
pub trait OrderCreated: Send + Sync {
    /// Pushes a new order to the integrated system using the per-call config.
    async fn on_order_created(
        &self,
        payload: &IntegrationPayload,
        config: &serde_json::Value,
    ) -> Result<(), ConnectError>;
}

/// Handles changes to an order already pushed out.
#[async_trait]
pub trait OrderUpdated: Send + Sync {
    async fn on_order_updated(
        &self,
        payload: &IntegrationPayload,
        config: &serde_json::Value,
    ) -> Result<(), ConnectError>;
}

/// Handles order cancellation.
#[async_trait]
pub trait OrderCanceled: Send + Sync {
    async fn on_order_canceled(
        &self,
        payload: &IntegrationPayload,
        config: &serde_json::Value,
    ) -> Result<(), ConnectError>;
}
