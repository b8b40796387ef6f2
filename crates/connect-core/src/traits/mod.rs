// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability trait definitions for integration plugins.
//!
//! Every integration implements the [`Integration`] base trait and opts into
//! capabilities by overriding the matching `as_*` query. Capability traits use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod integration;
pub mod order;
pub mod webhook;

pub use integration::Integration;
pub use order::{OrderCanceled, OrderCreated, OrderUpdated};
pub use webhook::WebhookReceiver;
