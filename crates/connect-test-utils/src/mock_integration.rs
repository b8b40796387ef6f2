// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock integration with a configurable capability set and behavior.
//!
//! Every instance produced by [`MockIntegration::factory`] shares the same
//! call log, so tests can inspect what the dispatcher invoked after the fact.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use connect_core::{
    Capability, ConnectError, Integration, IntegrationPayload, OrderCanceled, OrderCreated,
    OrderUpdated, QueryParams, WebhookReceiver,
};
use connect_registry::IntegrationFactory;

/// What a mock does when one of its capabilities is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockBehavior {
    Succeed,
    /// Return [`ConnectError::ExecutionFailed`] with this message.
    Fail(String),
    /// Panic with this message.
    Panic(String),
}

/// One recorded capability invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub capability: Capability,
    pub order_id: Option<String>,
    pub config: Option<serde_json::Value>,
    pub body: Option<serde_json::Value>,
    pub query: Option<QueryParams>,
}

/// A mock integration that records every call it receives.
#[derive(Clone)]
pub struct MockIntegration {
    id: String,
    capabilities: Vec<Capability>,
    behavior: MockBehavior,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    instances: Arc<AtomicUsize>,
}

impl MockIntegration {
    /// Create a mock that implements no capabilities.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            capabilities: Vec::new(),
            behavior: MockBehavior::Succeed,
            calls: Arc::new(Mutex::new(Vec::new())),
            instances: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A mock implementing all three order capabilities.
    pub fn order_output(id: impl Into<String>) -> Self {
        Self::new(id).with_capabilities(&[
            Capability::OrderCreated,
            Capability::OrderUpdated,
            Capability::OrderCanceled,
        ])
    }

    /// A mock implementing only the webhook receiver.
    pub fn webhook(id: impl Into<String>) -> Self {
        Self::new(id).with_capabilities(&[Capability::WebhookReceiver])
    }

    pub fn with_capabilities(mut self, capabilities: &[Capability]) -> Self {
        self.capabilities = capabilities.to_vec();
        self
    }

    /// Make every invocation return an error with `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.behavior = MockBehavior::Fail(message.into());
        self
    }

    /// Make every invocation panic with `message`.
    pub fn panicking(mut self, message: impl Into<String>) -> Self {
        self.behavior = MockBehavior::Panic(message.into());
        self
    }

    /// Factory that hands out instances sharing this mock's call log.
    pub fn factory(&self) -> impl IntegrationFactory + 'static {
        let template = self.clone();
        move || -> Result<Box<dyn Integration>, ConnectError> {
            template.instances.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(template.clone()))
        }
    }

    /// All calls received so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Number of instances the factory has produced.
    pub fn instances_created(&self) -> usize {
        self.instances.load(Ordering::SeqCst)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn implements(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    async fn record(&self, call: RecordedCall) -> Result<(), ConnectError> {
        self.calls.lock().await.push(call);

        match &self.behavior {
            MockBehavior::Succeed => Ok(()),
            MockBehavior::Fail(message) => Err(ConnectError::ExecutionFailed {
                id: self.id.clone(),
                message: message.clone(),
                source: None,
            }),
            MockBehavior::Panic(message) => panic!("{message}"),
        }
    }

    async fn record_order(
        &self,
        capability: Capability,
        payload: &IntegrationPayload,
        config: &serde_json::Value,
    ) -> Result<(), ConnectError> {
        self.record(RecordedCall {
            capability,
            order_id: Some(payload.order.id.clone()),
            config: Some(config.clone()),
            body: None,
            query: None,
        })
        .await
    }
}

impl Integration for MockIntegration {
    fn as_order_created(&self) -> Option<&dyn OrderCreated> {
        self.implements(Capability::OrderCreated)
            .then_some(self as &dyn OrderCreated)
    }

    fn as_order_updated(&self) -> Option<&dyn OrderUpdated> {
        self.implements(Capability::OrderUpdated)
            .then_some(self as &dyn OrderUpdated)
    }

    fn as_order_canceled(&self) -> Option<&dyn OrderCanceled> {
        self.implements(Capability::OrderCanceled)
            .then_some(self as &dyn OrderCanceled)
    }

    fn as_webhook_receiver(&self) -> Option<&dyn WebhookReceiver> {
        self.implements(Capability::WebhookReceiver)
            .then_some(self as &dyn WebhookReceiver)
    }
}

#[async_trait]
impl OrderCreated for MockIntegration {
    async fn on_order_created(
        &self,
        payload: &IntegrationPayload,
        config: &serde_json::Value,
    ) -> Result<(), ConnectError> {
        self.record_order(Capability::OrderCreated, payload, config)
            .await
    }
}

#[async_trait]
impl OrderUpdated for MockIntegration {
    async fn on_order_updated(
        &self,
        payload: &IntegrationPayload,
        config: &serde_json::Value,
    ) -> Result<(), ConnectError> {
        self.record_order(Capability::OrderUpdated, payload, config)
            .await
    }
}

#[async_trait]
impl OrderCanceled for MockIntegration {
    async fn on_order_canceled(
        &self,
        payload: &IntegrationPayload,
        config: &serde_json::Value,
    ) -> Result<(), ConnectError> {
        self.record_order(Capability::OrderCanceled, payload, config)
            .await
    }
}

#[async_trait]
impl WebhookReceiver for MockIntegration {
    async fn on_webhook_data(
        &self,
        body: &serde_json::Value,
        query: Option<&QueryParams>,
    ) -> Result<(), ConnectError> {
        self.record(RecordedCall {
            capability: Capability::WebhookReceiver,
            order_id: None,
            config: None,
            body: Some(body.clone()),
            query: query.cloned(),
        })
        .await
    }
}

/// A factory that always fails to construct its integration.
#[derive(Debug, Clone)]
pub struct FailingFactory {
    id: String,
    message: String,
}

impl FailingFactory {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }
}

impl IntegrationFactory for FailingFactory {
    fn create(&self) -> Result<Box<dyn Integration>, ConnectError> {
        Err(ConnectError::ConstructionFailed {
            id: self.id.clone(),
            message: self.message.clone(),
        })
    }
}
