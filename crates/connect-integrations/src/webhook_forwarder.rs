// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Forwards order lifecycle events to per-merchant webhook URLs.
//!
//! Each event kind has its own URL in the per-call config. The integration
//! payload is POSTed as JSON; a missing URL for the event is a no-op.

use std::time::Duration;

use async_trait::async_trait;
use connect_core::{
    ConnectError, Integration, IntegrationPayload, OrderCanceled, OrderCreated, OrderEventKind,
    OrderUpdated,
};
use connect_events::{EventEmitter, EventFields, IntegrationEventType};
use connect_registry::{IntegrationDescriptor, IntegrationRegistry, parse_integration_manifest};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::context::IntegrationContext;

pub const ID: &str = "webhook-forwarder";

const MANIFEST: &str = include_str!("../manifests/webhook_forwarder.toml");

/// Per-call configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WebhookForwarderConfig {
    #[serde(rename = "onCreatedURL")]
    pub on_created_url: Option<String>,
    #[serde(rename = "onUpdatedURL")]
    pub on_updated_url: Option<String>,
    #[serde(rename = "onCanceledURL")]
    pub on_canceled_url: Option<String>,
}

impl WebhookForwarderConfig {
    /// Parses the per-call config; `null` means no URLs.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ConnectError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value.clone())
            .map_err(|e| ConnectError::Config(format!("{ID}: invalid config: {e}")))
    }

    pub fn url_for(&self, event: OrderEventKind) -> Option<&str> {
        match event {
            OrderEventKind::Created => self.on_created_url.as_deref(),
            OrderEventKind::Updated => self.on_updated_url.as_deref(),
            OrderEventKind::Canceled => self.on_canceled_url.as_deref(),
        }
    }
}

/// Descriptor parsed from the bundled manifest.
pub fn descriptor() -> Result<IntegrationDescriptor, ConnectError> {
    parse_integration_manifest(MANIFEST)
}

/// Registers the forwarder with a factory closing over `ctx`.
pub fn register(
    registry: &IntegrationRegistry,
    ctx: &IntegrationContext,
) -> Result<(), ConnectError> {
    let descriptor = descriptor()?;
    let title = descriptor.title.clone();
    let integration_type = descriptor.integration_type;
    let ctx = ctx.clone();

    registry.register(
        descriptor,
        move || -> Result<Box<dyn Integration>, ConnectError> {
            Ok(Box::new(WebhookForwarder::new(
                ctx.http.clone(),
                ctx.events.create_dispatcher_for(title.clone(), integration_type),
                ctx.request_timeout,
            )))
        },
    );
    Ok(())
}

pub struct WebhookForwarder {
    http: reqwest::Client,
    emitter: EventEmitter,
    timeout: Duration,
}

impl WebhookForwarder {
    pub fn new(http: reqwest::Client, emitter: EventEmitter, timeout: Duration) -> Self {
        Self {
            http,
            emitter,
            timeout,
        }
    }

    async fn forward(
        &self,
        event: OrderEventKind,
        payload: &IntegrationPayload,
        config: &serde_json::Value,
    ) -> Result<(), ConnectError> {
        let capability = event.capability();
        let config = WebhookForwarderConfig::from_value(config)?;
        let Some(url) = config.url_for(event) else {
            warn!("{capability}: no webhook URL configured");
            return Ok(());
        };

        let order_id = payload.order.id.as_str();
        if order_id.trim().is_empty() {
            return Err(ConnectError::invalid_order(
                format!("{capability}: order id is required"),
                "id",
            ));
        }

        self.emitter.emit(
            EventFields::new(IntegrationEventType::Requested)
                .external_id(order_id)
                .metadata(serde_json::json!({ "url": url })),
        );
        debug!(%url, order_id, "{capability}: posting order");

        let response = self
            .http
            .post(url)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| ConnectError::Http {
                message: format!("{capability}: request to {url} failed: {e}"),
                status: e.status().map(|s| s.as_u16()),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectError::Http {
                message: format!("{capability}: {url} returned {status}: {body}"),
                status: Some(status.as_u16()),
                source: None,
            });
        }

        debug!(%status, order_id, "{capability}: webhook accepted");
        Ok(())
    }
}

impl Integration for WebhookForwarder {
    fn as_order_created(&self) -> Option<&dyn OrderCreated> {
        Some(self)
    }

    fn as_order_updated(&self) -> Option<&dyn OrderUpdated> {
        Some(self)
    }

    fn as_order_canceled(&self) -> Option<&dyn OrderCanceled> {
        Some(self)
    }
}

#[async_trait]
impl OrderCreated for WebhookForwarder {
    async fn on_order_created(
        &self,
        payload: &IntegrationPayload,
        config: &serde_json::Value,
    ) -> Result<(), ConnectError> {
        self.forward(OrderEventKind::Created, payload, config).await
    }
}

#[async_trait]
impl OrderUpdated for WebhookForwarder {
    async fn on_order_updated(
        &self,
        payload: &IntegrationPayload,
        config: &serde_json::Value,
    ) -> Result<(), ConnectError> {
        self.forward(OrderEventKind::Updated, payload, config).await
    }
}

#[async_trait]
impl OrderCanceled for WebhookForwarder {
    async fn on_order_canceled(
        &self,
        payload: &IntegrationPayload,
        config: &serde_json::Value,
    ) -> Result<(), ConnectError> {
        self.forward(OrderEventKind::Canceled, payload, config).await
    }
}
