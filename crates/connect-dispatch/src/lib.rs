// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Failure-isolating dispatch of order and webhook events.
//!
//! The [`Dispatcher`] resolves integration ids against the registry,
//! instantiates each one, checks that it implements the requested capability,
//! and invokes it. One integration failing never affects the others.

pub mod dispatcher;
pub mod metrics;
pub mod outcome;
pub mod request;

pub use dispatcher::Dispatcher;
pub use outcome::{DispatchOutcome, FailureStage, OutcomeReporter, TracingReporter};
pub use request::DispatchRequest;
