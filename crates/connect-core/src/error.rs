// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Connect integration hub.

use thiserror::Error;

use crate::types::Capability;

/// The primary error type used across integration traits and core operations.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Configuration errors (invalid TOML, malformed descriptor, bad per-call config).
    #[error("configuration error: {0}")]
    Config(String),

    /// The requested integration id is not present in the registry.
    #[error("integration not found: {id}")]
    IntegrationNotFound { id: String },

    /// The integration instance does not implement the requested capability.
    #[error("integration {id} does not implement {capability}")]
    CapabilityMissing { id: String, capability: Capability },

    /// The integration factory failed before any integration code ran.
    #[error("failed to construct integration {id}: {message}")]
    ConstructionFailed { id: String, message: String },

    /// The integration's own logic failed.
    #[error("integration {id} failed: {message}")]
    ExecutionFailed {
        id: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The payload handed to an integration is missing required data.
    #[error("invalid payload: {message}")]
    InvalidPayload {
        message: String,
        field: Option<String>,
    },

    /// The order inside the payload is missing required data.
    #[error("invalid order: {message}")]
    InvalidOrder {
        message: String,
        field: Option<String>,
    },

    /// Outbound HTTP request failed or returned a non-success status.
    #[error("http error: {message}")]
    Http {
        message: String,
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ConnectError {
    /// Builds an [`ConnectError::InvalidPayload`] pointing at a payload field.
    pub fn invalid_payload(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Builds an [`ConnectError::InvalidOrder`] pointing at an order field.
    pub fn invalid_order(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidOrder {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}
