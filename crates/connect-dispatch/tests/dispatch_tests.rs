// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatcher scenarios driven through the test harness.

use connect_core::{
    Capability, IntegrationCategory, IntegrationConfigs, IntegrationPayload, IntegrationType,
    Order, OrderEventKind, QueryParams,
};
use connect_dispatch::{DispatchOutcome, DispatchRequest, FailureStage};
use connect_events::IntegrationEventType;
use connect_registry::IntegrationDescriptor;
use connect_test_utils::{FailingFactory, MockIntegration, TestHarness};
use serde_json::json;

fn payload(order_id: &str) -> IntegrationPayload {
    IntegrationPayload::new(Order::with_id(order_id))
}

fn configs(entries: &[(&str, serde_json::Value)]) -> IntegrationConfigs {
    entries
        .iter()
        .map(|(id, config)| (id.to_string(), config.clone()))
        .collect()
}

#[tokio::test]
async fn unknown_id_is_reported_and_siblings_still_run() {
    let mut harness = TestHarness::new();
    let x = MockIntegration::order_output("x");
    harness.register_mock(&x);

    harness
        .dispatcher
        .dispatch_order_event(
            OrderEventKind::Created,
            &configs(&[("x", json!({ "token": "t" })), ("y", json!({}))]),
            &payload("order123"),
        )
        .await;

    assert_eq!(
        harness.reporter.outcomes_for("x"),
        vec![DispatchOutcome::Success {
            integration_id: "x".into(),
            capability: Capability::OrderCreated,
            order_id: Some("order123".into()),
        }]
    );
    assert_eq!(
        harness.reporter.outcomes_for("y"),
        vec![DispatchOutcome::IntegrationNotFound {
            integration_id: "y".into(),
            capability: Capability::OrderCreated,
        }]
    );

    let calls = x.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].config, Some(json!({ "token": "t" })));

    // Only the resolved id produces telemetry.
    let events = harness.drain_events();
    let types: Vec<_> = events.iter().map(|e| e.event_type).collect();
    assert_eq!(
        types,
        vec![IntegrationEventType::Initiated, IntegrationEventType::Completed]
    );
    assert!(events.iter().all(|e| e.integration_name == "Mock x"));
    assert!(events.iter().all(|e| e.external_id.as_deref() == Some("order123")));
}

#[tokio::test]
async fn missing_capability_is_reported_without_success() {
    let mut harness = TestHarness::new();
    let created_only = MockIntegration::new("created-only")
        .with_capabilities(&[Capability::OrderCreated]);
    harness.register_mock(&created_only);

    harness
        .dispatcher
        .dispatch_order_event(
            OrderEventKind::Canceled,
            &configs(&[("created-only", json!({}))]),
            &payload("o-1"),
        )
        .await;

    assert_eq!(harness.reporter.labels(), vec!["capability_missing"]);
    assert_eq!(
        harness.reporter.outcomes()[0].capability(),
        Capability::OrderCanceled
    );
    assert_eq!(created_only.call_count().await, 0);

    let types: Vec<_> = harness.drain_events().iter().map(|e| e.event_type).collect();
    assert_eq!(
        types,
        vec![IntegrationEventType::Initiated, IntegrationEventType::Cancelled]
    );
}

#[tokio::test]
async fn failing_integration_reports_exactly_one_failure() {
    let mut harness = TestHarness::new();
    let bad = MockIntegration::order_output("bad").failing("upstream rejected order");
    let good = MockIntegration::order_output("good");
    harness.register_mock(&bad);
    harness.register_mock(&good);

    harness
        .dispatcher
        .dispatch_order_event(
            OrderEventKind::Updated,
            &configs(&[("bad", json!({})), ("good", json!({}))]),
            &payload("o-2"),
        )
        .await;

    let failures = harness.reporter.outcomes_for("bad");
    assert_eq!(failures.len(), 1);
    match &failures[0] {
        DispatchOutcome::ExecutionFailed {
            stage,
            error,
            order_id,
            ..
        } => {
            assert_eq!(*stage, FailureStage::Execution);
            assert!(error.contains("upstream rejected order"));
            assert_eq!(order_id.as_deref(), Some("o-2"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(harness.reporter.outcomes_for("good")[0].is_success());

    let failed = harness
        .drain_events()
        .into_iter()
        .find(|e| e.event_type == IntegrationEventType::Failed)
        .unwrap();
    assert_eq!(failed.integration_name, "Mock bad");
    assert!(
        failed.metadata.unwrap()["error"]
            .as_str()
            .unwrap()
            .contains("upstream rejected order")
    );
}

#[tokio::test]
async fn panicking_integration_is_isolated() {
    let harness = TestHarness::new();
    let boom = MockIntegration::order_output("boom").panicking("index out of bounds");
    let after = MockIntegration::order_output("zz-after");
    harness.register_mock(&boom);
    harness.register_mock(&after);

    harness
        .dispatcher
        .dispatch_order_event(
            OrderEventKind::Created,
            &configs(&[("boom", json!({})), ("zz-after", json!({}))]),
            &payload("o-3"),
        )
        .await;

    assert_eq!(harness.reporter.labels(), vec!["failed", "success"]);
    match &harness.reporter.outcomes()[0] {
        DispatchOutcome::ExecutionFailed { error, .. } => {
            assert!(error.contains("index out of bounds"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(after.call_count().await, 1);
}

#[tokio::test]
async fn construction_failure_is_reported_as_execution_failure() {
    let mut harness = TestHarness::new();
    harness.register(
        IntegrationDescriptor::new(
            "broken",
            "Broken",
            IntegrationCategory::Logistics,
            IntegrationType::OrderOutput,
        ),
        FailingFactory::new("broken", "missing credentials"),
    );

    harness
        .dispatcher
        .dispatch_order_event(
            OrderEventKind::Created,
            &configs(&[("broken", json!({}))]),
            &payload("o-4"),
        )
        .await;

    match &harness.reporter.outcomes()[0] {
        DispatchOutcome::ExecutionFailed { stage, error, .. } => {
            assert_eq!(*stage, FailureStage::Construction);
            assert!(error.contains("missing credentials"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let types: Vec<_> = harness.drain_events().iter().map(|e| e.event_type).collect();
    assert_eq!(
        types,
        vec![IntegrationEventType::Initiated, IntegrationEventType::Failed]
    );
}

#[tokio::test]
async fn pairs_run_in_key_order() {
    let harness = TestHarness::new();
    for id in ["charlie", "alpha", "bravo"] {
        harness.register_mock(&MockIntegration::order_output(id));
    }

    harness
        .dispatcher
        .dispatch_order_event(
            OrderEventKind::Created,
            &configs(&[("charlie", json!({})), ("alpha", json!({})), ("bravo", json!({}))]),
            &payload("o-5"),
        )
        .await;

    let ids: Vec<String> = harness
        .reporter
        .outcomes()
        .iter()
        .map(|o| o.integration_id().to_string())
        .collect();
    assert_eq!(ids, vec!["alpha", "bravo", "charlie"]);
}

#[tokio::test]
async fn each_pair_gets_a_fresh_instance() {
    let harness = TestHarness::new();
    let x = MockIntegration::order_output("x");
    harness.register_mock(&x);

    let integrations = configs(&[("x", json!({}))]);
    for _ in 0..3 {
        harness
            .dispatcher
            .dispatch_order_event(OrderEventKind::Created, &integrations, &payload("o-6"))
            .await;
    }

    assert_eq!(x.instances_created(), 3);
}

#[tokio::test]
async fn empty_integrations_map_does_nothing() {
    let mut harness = TestHarness::new();
    harness
        .dispatcher
        .dispatch_order_event(
            OrderEventKind::Created,
            &IntegrationConfigs::new(),
            &payload("o-7"),
        )
        .await;

    assert!(harness.reporter.outcomes().is_empty());
    assert!(harness.drain_events().is_empty());
}

#[tokio::test]
async fn dispatch_request_forwards_event_kind() {
    let harness = TestHarness::new();
    let x = MockIntegration::order_output("x");
    harness.register_mock(&x);

    let request: DispatchRequest = serde_json::from_value(json!({
        "event": "updated",
        "integrations": { "x": { "url": "https://example.test" } },
        "payload": { "order": { "id": "o-8" } }
    }))
    .unwrap();
    harness.dispatcher.dispatch(&request).await;

    let calls = x.calls().await;
    assert_eq!(calls[0].capability, Capability::OrderUpdated);
    assert_eq!(calls[0].order_id.as_deref(), Some("o-8"));
}

#[tokio::test]
#[allow(deprecated)]
async fn deprecated_on_order_created_still_dispatches() {
    let harness = TestHarness::new();
    let x = MockIntegration::order_output("x");
    harness.register_mock(&x);

    harness
        .dispatcher
        .on_order_created(&configs(&[("x", json!({}))]), &payload("o-9"))
        .await;

    assert_eq!(x.calls().await[0].capability, Capability::OrderCreated);
}

#[tokio::test]
async fn webhook_reaches_receiver_with_query() {
    let mut harness = TestHarness::new();
    let hook = MockIntegration::webhook("hook");
    harness.register_mock(&hook);

    let mut query = QueryParams::new();
    query.insert("merchant".into(), json!("m-1"));
    let body = json!({ "status": "DISPATCHED" });

    harness
        .dispatcher
        .dispatch_webhook("hook", &body, Some(&query))
        .await;

    let calls = hook.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, Some(body));
    assert_eq!(calls[0].query, Some(query));
    assert_eq!(
        harness.reporter.outcomes(),
        vec![DispatchOutcome::Success {
            integration_id: "hook".into(),
            capability: Capability::WebhookReceiver,
            order_id: None,
        }]
    );

    let events = harness.drain_events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.external_id.is_none()));
    assert!(events.iter().all(|e| e.integration_type == IntegrationType::WebhookInput));
}

#[tokio::test]
async fn webhook_unknown_id_publishes_nothing() {
    let mut harness = TestHarness::new();

    harness
        .dispatcher
        .dispatch_webhook("missing", &json!({}), None)
        .await;

    assert_eq!(harness.reporter.labels(), vec!["not_found"]);
    assert!(harness.drain_events().is_empty());
}

#[tokio::test]
async fn webhook_capability_missing_does_not_invoke() {
    let harness = TestHarness::new();
    let orders_only = MockIntegration::order_output("orders-only");
    harness.register_mock(&orders_only);

    harness
        .dispatcher
        .dispatch_webhook("orders-only", &json!({ "a": 1 }), None)
        .await;

    assert_eq!(
        harness.reporter.outcomes(),
        vec![DispatchOutcome::CapabilityMissing {
            integration_id: "orders-only".into(),
            capability: Capability::WebhookReceiver,
        }]
    );
    assert_eq!(orders_only.call_count().await, 0);
}

#[tokio::test]
async fn webhook_failure_is_contained() {
    let harness = TestHarness::new();
    let hook = MockIntegration::webhook("hook").failing("signature mismatch");
    harness.register_mock(&hook);

    harness
        .dispatcher
        .dispatch_webhook("hook", &json!({}), None)
        .await;

    match &harness.reporter.outcomes()[0] {
        DispatchOutcome::ExecutionFailed {
            order_id, error, ..
        } => {
            assert!(order_id.is_none());
            assert!(error.contains("signature mismatch"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn find_one_scenario() {
    let harness = TestHarness::new();
    assert!(harness.dispatcher.find_all().is_empty());

    harness.register_mock(&MockIntegration::order_output("x"));
    assert_eq!(harness.dispatcher.find_one("x").unwrap().id(), "x");
    assert!(harness.dispatcher.find_one("y").is_none());
}
