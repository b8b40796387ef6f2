// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch metric registration and recording helpers.
//!
//! Uses the metrics-rs facade; without an installed recorder these are no-ops.

use connect_core::Capability;
use metrics::{describe_counter, describe_histogram};

use crate::outcome::DispatchOutcome;

/// `integration` label used for ids that did not resolve.
///
/// Caller-supplied ids are unbounded, so they never become label values.
pub const UNKNOWN_INTEGRATION: &str = "unknown";

/// Register metric descriptions. Call once after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        "connect_dispatch_total",
        "Integration dispatch attempts by outcome"
    );
    describe_histogram!(
        "connect_dispatch_duration_seconds",
        "Time spent instantiating and invoking an integration"
    );
}

/// Record one dispatch outcome.
pub fn record_outcome(outcome: &DispatchOutcome) {
    metrics::counter!(
        "connect_dispatch_total",
        "integration" => integration_label(outcome).to_string(),
        "capability" => outcome.capability().to_string(),
        "outcome" => outcome.label()
    )
    .increment(1);
}

fn integration_label(outcome: &DispatchOutcome) -> &str {
    match outcome {
        DispatchOutcome::IntegrationNotFound { .. } => UNKNOWN_INTEGRATION,
        other => other.integration_id(),
    }
}

/// Record how long an attempt took.
pub fn record_duration(integration: &str, capability: Capability, seconds: f64) {
    metrics::histogram!(
        "connect_dispatch_duration_seconds",
        "integration" => integration.to_string(),
        "capability" => capability.to_string()
    )
    .record(seconds);
}
