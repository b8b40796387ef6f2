// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Connect integration hub.
//!
//! This crate provides the capability traits integrations implement, the
//! shared error type, and the order payload model handed to integrations.

pub mod error;
pub mod order;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ConnectError;
pub use order::{IntegrationPayload, Merchant, Order, OrderEvent, OrderEventType};
pub use types::{
    Capability, IntegrationCategory, IntegrationConfigs, IntegrationType, OrderEventKind,
    QueryParams,
};

pub use traits::{Integration, OrderCanceled, OrderCreated, OrderUpdated, WebhookReceiver};
