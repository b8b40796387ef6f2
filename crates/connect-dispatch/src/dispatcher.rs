// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routes order and webhook events to registered integrations.
//!
//! Each integration id in a batch is handled on its own: resolve, instantiate,
//! capability-check, invoke. A failure at any step (including a panic) is
//! reported and the batch moves on. Ids are processed sequentially in map
//! order; there is no timeout and no retry.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use connect_core::{
    Capability, ConnectError, Integration, IntegrationConfigs, IntegrationPayload,
    OrderEventKind, QueryParams,
};
use connect_events::{EventChannel, EventEmitter, EventFields, IntegrationEventType};
use connect_registry::{CatalogEntry, IntegrationRegistry};
use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::{debug, instrument};

use crate::metrics;
use crate::outcome::{DispatchOutcome, FailureStage, OutcomeReporter, TracingReporter};
use crate::request::DispatchRequest;

type Invocation<'a> = BoxFuture<'a, Result<(), ConnectError>>;

/// Dispatches lifecycle events to integrations from a registry.
pub struct Dispatcher {
    registry: Arc<IntegrationRegistry>,
    events: EventChannel,
    reporter: Arc<dyn OutcomeReporter>,
}

impl Dispatcher {
    /// Create a dispatcher that reports outcomes through `tracing`.
    pub fn new(registry: Arc<IntegrationRegistry>, events: EventChannel) -> Self {
        Self {
            registry,
            events,
            reporter: Arc::new(TracingReporter),
        }
    }

    /// Replace the outcome reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn OutcomeReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn registry(&self) -> &IntegrationRegistry {
        &self.registry
    }

    pub fn events(&self) -> &EventChannel {
        &self.events
    }

    /// All registered integrations, in registration order.
    pub fn find_all(&self) -> Vec<Arc<CatalogEntry>> {
        self.registry.list()
    }

    /// Looks up one integration by id.
    pub fn find_one(&self, integration_id: &str) -> Option<Arc<CatalogEntry>> {
        self.find_all()
            .into_iter()
            .find(|entry| entry.descriptor.id == integration_id)
    }

    /// Dispatches a [`DispatchRequest`].
    pub async fn dispatch(&self, request: &DispatchRequest) {
        self.dispatch_order_event(request.event, &request.integrations, &request.payload)
            .await;
    }

    #[deprecated(note = "use `dispatch_order_event(OrderEventKind::Created, ..)`")]
    pub async fn on_order_created(
        &self,
        integrations: &IntegrationConfigs,
        payload: &IntegrationPayload,
    ) {
        self.dispatch_order_event(OrderEventKind::Created, integrations, payload)
            .await;
    }

    /// Sends an order event to every integration in `integrations`.
    ///
    /// Always completes. Per-integration results go to the reporter and the
    /// event channel only.
    #[instrument(skip_all, fields(event = %event, order_id = %payload.order.id))]
    pub async fn dispatch_order_event(
        &self,
        event: OrderEventKind,
        integrations: &IntegrationConfigs,
        payload: &IntegrationPayload,
    ) {
        debug!(count = integrations.len(), "dispatching order event");

        for (integration_id, config) in integrations {
            let outcome = self
                .dispatch_order_to(event, integration_id, config, payload)
                .await;
            self.report(&outcome);
        }
    }

    /// Routes inbound webhook data to one integration.
    ///
    /// An integration that does not implement [`Capability::WebhookReceiver`]
    /// is reported and not invoked.
    #[instrument(skip(self, body, query))]
    pub async fn dispatch_webhook(
        &self,
        integration_id: &str,
        body: &serde_json::Value,
        query: Option<&QueryParams>,
    ) {
        let capability = Capability::WebhookReceiver;

        let outcome = match self.find_one(integration_id) {
            None => DispatchOutcome::IntegrationNotFound {
                integration_id: integration_id.to_string(),
                capability,
            },
            Some(entry) => {
                let attempt = Attempt::start(&self.events, &entry, capability, None);
                match attempt.instantiate(&entry) {
                    Err(outcome) => outcome,
                    Ok(instance) => {
                        let invocation = instance
                            .as_webhook_receiver()
                            .map(|receiver| receiver.on_webhook_data(body, query));
                        attempt.run(invocation).await
                    }
                }
            }
        };

        self.report(&outcome);
    }

    async fn dispatch_order_to(
        &self,
        event: OrderEventKind,
        integration_id: &str,
        config: &serde_json::Value,
        payload: &IntegrationPayload,
    ) -> DispatchOutcome {
        let capability = event.capability();

        let Some(entry) = self.find_one(integration_id) else {
            return DispatchOutcome::IntegrationNotFound {
                integration_id: integration_id.to_string(),
                capability,
            };
        };

        let attempt = Attempt::start(
            &self.events,
            &entry,
            capability,
            Some(payload.order.id.clone()),
        );

        let instance = match attempt.instantiate(&entry) {
            Ok(instance) => instance,
            Err(outcome) => return outcome,
        };

        let invocation: Option<Invocation<'_>> = match event {
            OrderEventKind::Created => instance
                .as_order_created()
                .map(|handler| handler.on_order_created(payload, config)),
            OrderEventKind::Updated => instance
                .as_order_updated()
                .map(|handler| handler.on_order_updated(payload, config)),
            OrderEventKind::Canceled => instance
                .as_order_canceled()
                .map(|handler| handler.on_order_canceled(payload, config)),
        };

        attempt.run(invocation).await
    }

    fn report(&self, outcome: &DispatchOutcome) {
        metrics::record_outcome(outcome);
        self.reporter.report(outcome);
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("events", &self.events)
            .finish()
    }
}

/// One resolved integration attempt and its telemetry.
///
/// Publishes `INTEGRATION_INITIATED` on start and exactly one of
/// `COMPLETED`, `FAILED`, or `CANCELLED` when it ends.
struct Attempt {
    emitter: EventEmitter,
    integration_id: String,
    capability: Capability,
    external_id: Option<String>,
    started: Instant,
}

impl Attempt {
    fn start(
        events: &EventChannel,
        entry: &CatalogEntry,
        capability: Capability,
        external_id: Option<String>,
    ) -> Self {
        let attempt = Self {
            emitter: events.create_dispatcher_for(
                entry.descriptor.title.clone(),
                entry.descriptor.integration_type,
            ),
            integration_id: entry.descriptor.id.clone(),
            capability,
            external_id,
            started: Instant::now(),
        };
        attempt.emit(
            EventFields::new(IntegrationEventType::Initiated).notes(capability.to_string()),
        );
        attempt
    }

    fn instantiate(&self, entry: &CatalogEntry) -> Result<Box<dyn Integration>, DispatchOutcome> {
        let created = std::panic::catch_unwind(AssertUnwindSafe(|| entry.instantiate()));
        let message = match created {
            Ok(Ok(instance)) => return Ok(instance),
            Ok(Err(err)) => err.to_string(),
            Err(panic) => panic_message(panic),
        };
        Err(self.failed(FailureStage::Construction, message))
    }

    async fn run(self, invocation: Option<Invocation<'_>>) -> DispatchOutcome {
        let Some(invocation) = invocation else {
            self.emit(
                EventFields::new(IntegrationEventType::Cancelled)
                    .notes(format!("{} is not implemented", self.capability)),
            );
            return DispatchOutcome::CapabilityMissing {
                integration_id: self.integration_id,
                capability: self.capability,
            };
        };

        let result = AssertUnwindSafe(invocation).catch_unwind().await;
        metrics::record_duration(
            &self.integration_id,
            self.capability,
            self.started.elapsed().as_secs_f64(),
        );

        match result {
            Ok(Ok(())) => {
                self.emit(IntegrationEventType::Completed);
                DispatchOutcome::Success {
                    integration_id: self.integration_id,
                    capability: self.capability,
                    order_id: self.external_id,
                }
            }
            Ok(Err(err)) => self.failed(FailureStage::Execution, err.to_string()),
            Err(panic) => self.failed(FailureStage::Execution, panic_message(panic)),
        }
    }

    fn failed(&self, stage: FailureStage, error: String) -> DispatchOutcome {
        self.emit(
            EventFields::new(IntegrationEventType::Failed)
                .metadata(serde_json::json!({ "error": error })),
        );
        DispatchOutcome::ExecutionFailed {
            integration_id: self.integration_id.clone(),
            capability: self.capability,
            order_id: self.external_id.clone(),
            stage,
            error,
        }
    }

    fn emit(&self, fields: impl Into<EventFields>) {
        let mut fields = fields.into();
        fields.external_id = self.external_id.clone();
        self.emitter.emit(fields);
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
