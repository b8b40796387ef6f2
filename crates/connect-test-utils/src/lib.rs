// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Connect integration tests.
//!
//! Provides mock integrations and a harness for fast, deterministic tests
//! that never touch a real integrated system.
//!
//! # Components
//!
//! - [`MockIntegration`] - Integration with a chosen capability set and behavior
//! - [`FailingFactory`] - Factory whose construction always fails
//! - [`RecordingReporter`] - Keeps dispatch outcomes for assertions
//! - [`TestHarness`] - Registry, channel, and dispatcher wired together

pub mod harness;
pub mod mock_integration;
pub mod reporter;

pub use harness::TestHarness;
pub use mock_integration::{FailingFactory, MockBehavior, MockIntegration, RecordedCall};
pub use reporter::RecordingReporter;
