// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outcome reporter that keeps every outcome for later assertions.

use std::sync::{Mutex, PoisonError};

use connect_dispatch::{DispatchOutcome, OutcomeReporter};

/// Captures dispatch outcomes in arrival order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    outcomes: Mutex<Vec<DispatchOutcome>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn outcomes(&self) -> Vec<DispatchOutcome> {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Outcomes reported for one integration id.
    pub fn outcomes_for(&self, integration_id: &str) -> Vec<DispatchOutcome> {
        self.outcomes()
            .into_iter()
            .filter(|o| o.integration_id() == integration_id)
            .collect()
    }

    /// Metric-style labels of all outcomes, in order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.outcomes().iter().map(DispatchOutcome::label).collect()
    }

    pub fn clear(&self) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl OutcomeReporter for RecordingReporter {
    fn report(&self, outcome: &DispatchOutcome) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(outcome.clone());
    }
}
