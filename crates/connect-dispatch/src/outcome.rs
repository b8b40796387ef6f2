// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-integration dispatch outcomes and where they are reported.
//!
//! Dispatch never returns errors to its caller. Each integration attempt ends
//! in exactly one [`DispatchOutcome`], handed to an [`OutcomeReporter`].

use connect_core::Capability;
use tracing::{error, info};

/// Where an execution failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// The factory failed before any integration code ran.
    Construction,
    /// The capability method failed or panicked.
    Execution,
}

/// Final result of dispatching one event to one integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Success {
        integration_id: String,
        capability: Capability,
        order_id: Option<String>,
    },
    IntegrationNotFound {
        integration_id: String,
        capability: Capability,
    },
    CapabilityMissing {
        integration_id: String,
        capability: Capability,
    },
    ExecutionFailed {
        integration_id: String,
        capability: Capability,
        order_id: Option<String>,
        stage: FailureStage,
        error: String,
    },
}

impl DispatchOutcome {
    pub fn integration_id(&self) -> &str {
        match self {
            DispatchOutcome::Success { integration_id, .. }
            | DispatchOutcome::IntegrationNotFound { integration_id, .. }
            | DispatchOutcome::CapabilityMissing { integration_id, .. }
            | DispatchOutcome::ExecutionFailed { integration_id, .. } => integration_id,
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            DispatchOutcome::Success { capability, .. }
            | DispatchOutcome::IntegrationNotFound { capability, .. }
            | DispatchOutcome::CapabilityMissing { capability, .. }
            | DispatchOutcome::ExecutionFailed { capability, .. } => *capability,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Success { .. })
    }

    /// Short label used as a metric dimension.
    pub fn label(&self) -> &'static str {
        match self {
            DispatchOutcome::Success { .. } => "success",
            DispatchOutcome::IntegrationNotFound { .. } => "not_found",
            DispatchOutcome::CapabilityMissing { .. } => "capability_missing",
            DispatchOutcome::ExecutionFailed { .. } => "failed",
        }
    }
}

/// Receives every dispatch outcome.
///
/// Implementations must not block; they run inline on the dispatching task.
pub trait OutcomeReporter: Send + Sync {
    fn report(&self, outcome: &DispatchOutcome);
}

/// Reports outcomes as log lines: successes at `info`, everything else at `error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl OutcomeReporter for TracingReporter {
    fn report(&self, outcome: &DispatchOutcome) {
        match outcome {
            DispatchOutcome::Success {
                integration_id,
                capability,
                order_id: Some(order_id),
            } => info!(
                "{capability}: integration with ID '{integration_id}' successfully processed order '{order_id}'."
            ),
            DispatchOutcome::Success {
                integration_id,
                capability,
                order_id: None,
            } => info!(
                "{capability}: integration with ID '{integration_id}' processed the request."
            ),
            DispatchOutcome::IntegrationNotFound {
                integration_id,
                capability,
            } => error!("{capability}: integration with ID '{integration_id}' was not found."),
            DispatchOutcome::CapabilityMissing {
                integration_id,
                capability,
            } => error!(
                "{capability}: integration with ID '{integration_id}' does not implement '{capability}'."
            ),
            DispatchOutcome::ExecutionFailed {
                integration_id,
                capability,
                order_id: Some(order_id),
                stage,
                error,
            } => error!(
                ?stage,
                error = %error,
                "{capability}: an error occurred while executing integration '{integration_id}' for order '{order_id}'."
            ),
            DispatchOutcome::ExecutionFailed {
                integration_id,
                capability,
                order_id: None,
                stage,
                error,
            } => error!(
                ?stage,
                integration_id = %integration_id,
                "{capability}: {error}"
            ),
        }
    }
}
