// SPDX-FileCopyrightText: 2026 Connect Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connect - order integration hub.
//!
//! This is the binary entry point: it loads configuration, registers the
//! built-in integrations, and runs one command against them.

mod app;
mod catalog;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use connect_core::{IntegrationType, OrderEventKind};

use crate::app::App;

/// Connect - order integration hub.
#[derive(Parser, Debug)]
#[command(name = "connect", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered integrations.
    List {
        /// Only entries whose id, title, or description contain this text.
        #[arg(long)]
        search: Option<String>,
        /// Only entries of this type (OrderOutput, WebhookInput).
        #[arg(long = "type")]
        integration_type: Option<IntegrationType>,
        /// Print descriptors as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show one integration's descriptor as JSON.
    Show { id: String },
    /// Send an order event to integrations.
    Dispatch {
        /// created, updated, or canceled.
        #[arg(long)]
        event: OrderEventKind,
        /// JSON file holding the integration payload.
        #[arg(long)]
        payload: PathBuf,
        /// JSON object of integration id to per-call config. Defaults to `[integrations]`.
        #[arg(long)]
        integrations: Option<PathBuf>,
        /// Echo telemetry records as JSON lines.
        #[arg(long)]
        print_events: bool,
    },
    /// Route webhook data to one integration.
    Webhook {
        id: String,
        /// JSON file holding the webhook body.
        #[arg(long)]
        body: PathBuf,
        /// Query parameter as key=value; repeatable.
        #[arg(long = "query", value_parser = run::parse_query_pair)]
        query: Vec<(String, String)>,
        /// Echo telemetry records as JSON lines.
        #[arg(long)]
        print_events: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => connect_config::load_and_validate_path(path),
        None => connect_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            connect_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);
    connect_dispatch::metrics::register_metrics();

    let app = match App::bootstrap(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("connect: startup failed: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::List {
            search,
            integration_type,
            json,
        } => catalog::run_list(&app.registry, search.as_deref(), integration_type, json),
        Commands::Show { id } => catalog::run_show(&app.registry, &id),
        Commands::Dispatch {
            event,
            payload,
            integrations,
            print_events,
        } => {
            run::run_dispatch(
                &app,
                event,
                &payload,
                integrations.as_deref(),
                &config.integrations,
                print_events,
            )
            .await
        }
        Commands::Webhook {
            id,
            body,
            query,
            print_events,
        } => run::run_webhook(&app, &id, &body, &query, print_events).await,
    };

    if let Err(e) = result {
        eprintln!("connect: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let level = log_level.to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("connect={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
