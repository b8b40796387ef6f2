// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch metrics recorded through a local debugging recorder.

use std::collections::BTreeMap;

use connect_core::{Capability, IntegrationConfigs, IntegrationPayload, Order, OrderEventKind};
use connect_test_utils::{MockIntegration, TestHarness};
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use serde_json::json;

fn labels(key: &metrics::Key) -> BTreeMap<String, String> {
    key.labels()
        .map(|label| (label.key().to_string(), label.value().to_string()))
        .collect()
}

fn label_set(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn dispatch_records_counters_and_durations() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let harness = TestHarness::new();
    harness.register_mock(&MockIntegration::order_output("ok"));
    harness.register_mock(
        &MockIntegration::new("partial").with_capabilities(&[Capability::OrderCreated]),
    );

    let integrations: IntegrationConfigs = ["ghost", "ok", "partial"]
        .into_iter()
        .map(|id| (id.to_string(), json!({})))
        .collect();
    let payload = IntegrationPayload::new(Order::with_id("o-1"));

    metrics::with_local_recorder(&recorder, || {
        futures::executor::block_on(harness.dispatcher.dispatch_order_event(
            OrderEventKind::Canceled,
            &integrations,
            &payload,
        ));
    });

    let mut counters = Vec::new();
    let mut histograms = Vec::new();
    for (key, _, _, value) in snapshotter.snapshot().into_vec() {
        let name = key.key().name().to_string();
        let labels = labels(key.key());
        match (key.kind(), value) {
            (MetricKind::Counter, DebugValue::Counter(count)) => {
                assert_eq!(name, "connect_dispatch_total");
                counters.push((labels, count));
            }
            (MetricKind::Histogram, DebugValue::Histogram(samples)) => {
                assert_eq!(name, "connect_dispatch_duration_seconds");
                histograms.push((labels, samples.len()));
            }
            (kind, value) => panic!("unexpected metric {name}: {kind:?} {value:?}"),
        }
    }
    counters.sort();

    let capability = Capability::OrderCanceled.to_string();
    assert_eq!(
        counters,
        vec![
            (
                label_set(&[
                    ("capability", capability.as_str()),
                    ("integration", "ok"),
                    ("outcome", "success"),
                ]),
                1,
            ),
            (
                label_set(&[
                    ("capability", capability.as_str()),
                    ("integration", "partial"),
                    ("outcome", "capability_missing"),
                ]),
                1,
            ),
            (
                label_set(&[
                    ("capability", capability.as_str()),
                    ("integration", "unknown"),
                    ("outcome", "not_found"),
                ]),
                1,
            ),
        ]
    );

    // Only the invoked pair is timed.
    assert_eq!(
        histograms,
        vec![(
            label_set(&[("capability", capability.as_str()), ("integration", "ok")]),
            1,
        )]
    );
}
