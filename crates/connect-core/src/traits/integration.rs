// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait that all integration instances implement.

use crate::traits::order::{OrderCanceled, OrderCreated, OrderUpdated};
use crate::traits::webhook::WebhookReceiver;
use crate::types::Capability;

/// A live integration instance produced by a registered factory.
///
/// Capability support is discovered at runtime through the `as_*` queries.
/// Each query defaults to `None`; an integration overrides the ones it
/// implements, usually with `Some(self)`.
pub trait Integration: Send + Sync + 'static {
    fn as_order_created(&self) -> Option<&dyn OrderCreated> {
        None
    }

    fn as_order_updated(&self) -> Option<&dyn OrderUpdated> {
        None
    }

    fn as_order_canceled(&self) -> Option<&dyn OrderCanceled> {
        None
    }

    fn as_webhook_receiver(&self) -> Option<&dyn WebhookReceiver> {
        None
    }

    /// Returns true if this instance implements `capability`.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::OrderCreated => self.as_order_created().is_some(),
            Capability::OrderUpdated => self.as_order_updated().is_some(),
            Capability::OrderCanceled => self.as_order_canceled().is_some(),
            Capability::WebhookReceiver => self.as_webhook_receiver().is_some(),
        }
    }

    /// Lists the capabilities this instance implements.
    fn capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.supports(*c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::ConnectError;
    use crate::order::IntegrationPayload;

    struct CreateOnly;

    #[async_trait]
    impl OrderCreated for CreateOnly {
        async fn on_order_created(
            &self,
            _payload: &IntegrationPayload,
            _config: &serde_json::Value,
        ) -> Result<(), ConnectError> {
            Ok(())
        }
    }

    impl Integration for CreateOnly {
        fn as_order_created(&self) -> Option<&dyn OrderCreated> {
            Some(self)
        }
    }

    struct Nothing;

    impl Integration for Nothing {}

    #[test]
    fn capability_query_reflects_overrides() {
        let instance: Box<dyn Integration> = Box::new(CreateOnly);
        assert!(instance.supports(Capability::OrderCreated));
        assert!(!instance.supports(Capability::OrderUpdated));
        assert!(!instance.supports(Capability::WebhookReceiver));
        assert_eq!(instance.capabilities(), vec![Capability::OrderCreated]);
    }

    #[test]
    fn default_integration_has_no_capabilities() {
        let instance: Box<dyn Integration> = Box::new(Nothing);
        assert!(instance.capabilities().is_empty());
    }

    #[tokio::test]
    async fn capability_can_be_invoked_through_query() {
        let instance: Box<dyn Integration> = Box::new(CreateOnly);
        let handler = instance.as_order_created().expect("implements OrderCreated");
        let payload = IntegrationPayload::new(crate::order::Order::with_id("o1"));
        handler
            .on_order_created(&payload, &serde_json::Value::Null)
            .await
            .unwrap();
    }
}
