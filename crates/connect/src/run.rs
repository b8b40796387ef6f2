// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `connect dispatch` and `connect webhook`.
//!
//! Both commands always succeed once their inputs parse; per-integration
//! results show up in the log and, with `--print-events`, as telemetry
//! JSON lines on stdout.

use std::path::Path;

use connect_core::{
    ConnectError, IntegrationConfigs, IntegrationPayload, OrderEventKind, QueryParams,
};
use connect_events::EventRecord;
use serde_json::Value;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::warn;

use crate::app::App;

/// Run `connect dispatch`.
///
/// Without `--integrations`, the `[integrations]` table of the loaded
/// configuration is used.
pub async fn run_dispatch(
    app: &App,
    event: OrderEventKind,
    payload_path: &Path,
    integrations_path: Option<&Path>,
    defaults: &IntegrationConfigs,
    print_events: bool,
) -> Result<(), ConnectError> {
    let payload: IntegrationPayload = serde_json::from_value(read_json(payload_path).await?)
        .map_err(|e| ConnectError::invalid_payload(format!("malformed payload: {e}"), "order"))?;

    let integrations: IntegrationConfigs = match integrations_path {
        Some(path) => serde_json::from_value(read_json(path).await?).map_err(|e| {
            ConnectError::Config(format!(
                "{}: expected an object of integration id to config: {e}",
                path.display()
            ))
        })?,
        None => defaults.clone(),
    };

    if integrations.is_empty() {
        warn!("no integrations selected, nothing to dispatch");
    }

    let mut rx = print_events.then(|| app.events.subscribe());
    app.dispatcher
        .dispatch_order_event(event, &integrations, &payload)
        .await;
    if let Some(rx) = rx.as_mut() {
        print_records(rx);
    }
    Ok(())
}

/// Run `connect webhook <id>`.
pub async fn run_webhook(
    app: &App,
    id: &str,
    body_path: &Path,
    query: &[(String, String)],
    print_events: bool,
) -> Result<(), ConnectError> {
    let body = read_json(body_path).await?;
    let query = query_params(query);

    let mut rx = print_events.then(|| app.events.subscribe());
    app.dispatcher
        .dispatch_webhook(id, &body, query.as_ref())
        .await;
    if let Some(rx) = rx.as_mut() {
        print_records(rx);
    }
    Ok(())
}

/// Parses one `key=value` query argument.
pub fn parse_query_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}

/// `None` when no query arguments were given.
fn query_params(pairs: &[(String, String)]) -> Option<QueryParams> {
    if pairs.is_empty() {
        return None;
    }
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

async fn read_json(path: &Path) -> Result<Value, ConnectError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConnectError::Config(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| ConnectError::Config(format!("{} is not valid JSON: {e}", path.display())))
}

fn print_records(rx: &mut broadcast::Receiver<EventRecord>) {
    loop {
        match rx.try_recv() {
            Ok(record) => match serde_json::to_string(&record) {
                Ok(line) => println!("{line}"),
                Err(e) => warn!(error = %e, "failed to render telemetry record"),
            },
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "telemetry subscriber lagged, records dropped");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}
