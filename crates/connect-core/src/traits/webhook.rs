// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound webhook capability.

use async_trait::async_trait;

use crate::error::ConnectError;
use crate::types::QueryParams;

/// Receives inbound webhook data routed to the integration by id.
///
/// Implementing this trait signals that the integration wants webhook routing.
#[async_trait]
pub trait WebhookReceiver: Send + Sync {
    async fn on_webhook_data(
        &self,
        body: &serde_json::Value,
        query: Option<&QueryParams>,
    ) -> Result<(), ConnectError>;
}
