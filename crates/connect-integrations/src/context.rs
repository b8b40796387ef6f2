// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared dependencies handed to built-in integration factories.

use std::time::Duration;

use connect_config::HttpConfig;
use connect_core::ConnectError;
use connect_events::EventChannel;

/// Dependencies closed over by built-in factories at registration time.
#[derive(Debug, Clone)]
pub struct IntegrationContext {
    /// Pooled HTTP client shared by every instance.
    pub http: reqwest::Client,
    pub events: EventChannel,
    /// Upper bound for a single outbound request.
    pub request_timeout: Duration,
}

impl IntegrationContext {
    pub fn new(http: reqwest::Client, events: EventChannel, request_timeout: Duration) -> Self {
        Self {
            http,
            events,
            request_timeout,
        }
    }

    /// Build the HTTP client from the `[http]` config section.
    pub fn from_config(config: &HttpConfig, events: EventChannel) -> Result<Self, ConnectError> {
        let request_timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(request_timeout)
            .build()
            .map_err(|e| ConnectError::Http {
                message: format!("failed to build HTTP client: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;

        Ok(Self::new(http, events, request_timeout))
    }
}
